use crate::config::{Config, GlobeConfig, LabelsConfig, SpheresConfig};
use crate::entity::{Entity, Footprint};
use crate::error::Result;
use crate::globe::{orthogonal_projection_of, Arcball, GlobeView};
use crate::math;
use crate::places::Place;
use crate::projection::Projection;
use crate::scene::Scene;
use crate::style::{depth_shade, sphere_gradient, sphere_palette, Color, Fill};

/// Which scene the host shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Demo {
    /// A tilted ring of shaded spheres revolving about Y
    Spheres,
    /// A cloud of words on a sphere, with hover highlighting
    Labels,
    /// Drag-to-rotate globe of graticule dots and places
    Globe,
}

/// Scene plus the globe driver when the demo has one
pub struct DemoScene {
    pub scene: Scene,
    pub globe: Option<GlobeView>,
}

impl DemoScene {
    /// Per-frame step
    pub fn update(&mut self, dt: f64) {
        match &mut self.globe {
            Some(globe) => globe.update(&mut self.scene, dt),
            None => self.scene.update(dt),
        }
    }

    /// Puts every entity back where it started
    pub fn reset(&mut self) {
        if let Some(globe) = &mut self.globe {
            globe.controller.reset();
        }
        for entity in &mut self.scene.entities {
            entity.body.position = entity.body.anchor;
        }
        self.scene.refresh();
    }
}

/// Builds the chosen demo for a surface of `width` x `height` pixels
pub fn build(
    demo: Demo,
    config: &Config,
    width: f64,
    height: f64,
    places: &[Place],
) -> Result<DemoScene> {
    let extent = (width.min(height) * 0.5).max(1.0);
    let origin = [width * 0.5, height * 0.5];
    let projection = Projection::new(config.scene.focal_ratio * extent)?;
    let mut built = match demo {
        Demo::Spheres => DemoScene {
            scene: spheres(&config.spheres, extent, origin, projection),
            globe: None,
        },
        Demo::Labels => DemoScene {
            scene: labels(&config.labels, extent, origin, projection),
            globe: None,
        },
        Demo::Globe => globe(&config.globe, extent, origin, projection, places),
    };
    log::info!(
        "built {:?} demo: {} entities, focal length {:.1}",
        demo,
        built.scene.entities.len(),
        projection.focal_length()
    );
    built.update(0.0);
    Ok(built)
}

fn tinted_sphere(entity: &Entity, fp: &Footprint) -> Fill {
    let palette = sphere_palette(entity.color);
    let shade = depth_shade(fp.scale);
    Fill::Radial(sphere_gradient(fp.x, fp.y, fp.r, &palette, shade))
}

fn ocean(_: &Entity, fp: &Footprint) -> Fill {
    let palette = sphere_palette(Color::rgb(20, 60, 140));
    Fill::Radial(sphere_gradient(fp.x, fp.y, fp.r, &palette, 1.0))
}

fn parse_color(hex: &str, fallback: Color) -> Color {
    Color::from_hex(hex).unwrap_or_else(|| {
        log::warn!("ignoring bad color {hex:?}");
        fallback
    })
}

/// Ring of spheres in the XZ plane, tilted about X
pub fn spheres(
    cfg: &SpheresConfig,
    extent: f64,
    origin: [f64; 2],
    projection: Projection,
) -> Scene {
    let mut scene = Scene::new(projection, origin)
        .with_angular_velocity(cfg.angular_velocity);
    let orbit = cfg.orbit_radius * extent;
    let radius = cfg.radius * extent;
    for i in 0..cfg.count {
        let angle = i as f64 / cfg.count as f64 * std::f64::consts::TAU;
        let (sin, cos) = angle.sin_cos();
        let position = math::rotate_x([orbit * cos, 0.0, orbit * sin], cfg.tilt);
        let mut sphere = Entity::sphere(position, radius);
        if !cfg.colors.is_empty() {
            sphere.color = parse_color(&cfg.colors[i % cfg.colors.len()], sphere.color);
            sphere = sphere.with_style(tinted_sphere);
        }
        scene.push(sphere);
    }
    scene
}

/// Evenly spread unit vectors (Fibonacci sphere)
pub fn fibonacci_sphere(count: usize) -> Vec<[f64; 3]> {
    let golden = std::f64::consts::PI * (3.0 - 5f64.sqrt());
    (0..count)
        .map(|i| {
            let y = 1.0 - 2.0 * (i as f64 + 0.5) / count as f64;
            let r = (1.0 - y * y).sqrt();
            let (sin, cos) = (golden * i as f64).sin_cos();
            [r * cos, y, r * sin]
        })
        .collect()
}

/// Words spread over a sphere
pub fn labels(cfg: &LabelsConfig, extent: f64, origin: [f64; 2], projection: Projection) -> Scene {
    let mut scene = Scene::new(projection, origin)
        .with_angular_velocity(cfg.angular_velocity);
    let color = parse_color(&cfg.color, Color::WHITE);
    let radius = cfg.radius * extent;
    let font = cfg.font_size * extent;
    for (word, dir) in cfg.words.iter().zip(fibonacci_sphere(cfg.words.len())) {
        let position = math::scale(dir, radius);
        scene.push(Entity::label(position, word.as_str(), font, color));
    }
    scene
}

/// Globe of graticule dots around an ocean sphere, plus labelled places
pub fn globe(
    cfg: &GlobeConfig,
    extent: f64,
    origin: [f64; 2],
    projection: Projection,
    places: &[Place],
) -> DemoScene {
    let mut scene = Scene::new(projection, origin);
    let radius = cfg.radius * extent;
    let dot = cfg.dot_radius * extent;

    scene.push(Entity::sphere([0.0; 3], radius * 0.97).with_style(ocean));

    let step = cfg.graticule_step;
    let dot_color = Color::rgb(120, 200, 140);
    let marker_color = Color::rgb(255, 120, 80);
    let mut lat = -90.0 + step;
    while lat < 90.0 - 1e-9 {
        let mut lon: f64 = -180.0;
        while lon < 180.0 - 1e-9 {
            let v = orthogonal_projection_of(lon.to_radians(), lat.to_radians());
            scene.push(Entity::circle(math::scale(v, radius), dot, dot_color));
            lon += step;
        }
        lat += step;
    }
    for pole in [90.0f64, -90.0] {
        let v = orthogonal_projection_of(0.0, pole.to_radians());
        scene.push(Entity::circle(math::scale(v, radius), dot, dot_color));
    }

    for place in places {
        let v = orthogonal_projection_of(place.lon.to_radians(), place.lat.to_radians());
        let position = math::scale(v, radius);
        scene.push(Entity::circle(position, dot * 1.5, marker_color));
        scene.push(Entity::label(
            math::scale(v, radius * 1.08),
            place.name.as_str(),
            dot * 4.0,
            Color::WHITE,
        ));
    }

    let view = GlobeView::new(
        Arcball {
            center: origin,
            radius,
        },
        cfg.controller.build(),
        cfg.spin_rate,
    );
    DemoScene {
        scene,
        globe: Some(view),
    }
}
