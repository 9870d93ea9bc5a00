use crate::scene::{BackdropConfig, SolarSystem};
use crate::CelestialRng;
use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::render_asset::RenderAssetUsages;
use rand::Rng;

pub struct BackdropPlugin;

impl Plugin for BackdropPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_backdrop);
    }
}

#[derive(Debug, Copy, Clone, Component, Reflect)]
#[reflect(Component)]
pub struct Backdrop;

/// Point cloud of `count` points scattered uniformly in a cube centered on the origin.
pub fn point_cloud(config: &BackdropConfig, rng: &mut impl Rng) -> Mesh {
    let half = config.extent / 2.0;
    let positions: Vec<[f32; 3]> = (0..config.count)
        .map(|_| {
            [
                rng.gen_range(-half..=half),
                rng.gen_range(-half..=half),
                rng.gen_range(-half..=half),
            ]
        })
        .collect();
    Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
}

fn spawn_backdrop(
    mut commands: Commands,
    scene: Res<SolarSystem>,
    mut rng: ResMut<CelestialRng>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if scene.backdrop.count == 0 {
        return;
    }
    let mesh = meshes.add(point_cloud(&scene.backdrop, &mut **rng));
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        ..default()
    });
    commands.spawn((
        Backdrop,
        Name::new("Backdrop"),
        Mesh3d(mesh),
        MeshMaterial3d(material),
        Transform::default(),
        NotShadowCaster,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_stay_inside_the_cube() {
        let config = BackdropConfig {
            count: 500,
            extent: 200.0,
        };
        let mut rng = CelestialRng::seeded(3);
        let mesh = point_cloud(&config, &mut *rng);

        assert_eq!(mesh.count_vertices(), 500);
        let Some(positions) = mesh
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .and_then(|values| values.as_float3())
        else {
            panic!("backdrop mesh has no positions");
        };
        assert!(positions
            .iter()
            .flatten()
            .all(|coordinate| coordinate.abs() <= 100.0));
    }
}
