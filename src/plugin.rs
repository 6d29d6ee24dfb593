//! Bevy plugin driving a herd from the ECS schedule.
//!
//! Hosts insert a [`Herd`] resource, tag the player entity with [`Player`],
//! and tag each animal's visual with an [`AnimalHandle`]. Every `Update` the
//! herd advances by the frame delta and animal transforms are rewritten from
//! the controller's positions and headings.

use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

use bevy_app::{App, Plugin, Update};
use bevy_ecs::prelude::*;
use bevy_math::Quat;
use bevy_time::Time;
use bevy_transform::components::Transform;
use log::trace;

use crate::animal::AnimalId;
use crate::behaviour::AnimalBehaviourController;
use crate::terrain::TerrainHeightQuery;

/// Marks the entity animals flee from.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Links an entity to an animal in the [`Herd`].
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimalHandle(pub AnimalId);

/// Resource wrapping the behaviour controller.
#[derive(Resource, Debug)]
pub struct Herd<T: TerrainHeightQuery + Send + Sync + 'static>(
    pub AnimalBehaviourController<T>,
);

impl<T: TerrainHeightQuery + Send + Sync + 'static> Deref for Herd<T> {
    type Target = AnimalBehaviourController<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: TerrainHeightQuery + Send + Sync + 'static> DerefMut for Herd<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Advances the herd by the frame delta using the player's position.
///
/// Does nothing until both a [`Herd`] and exactly one [`Player`] exist.
pub fn drive_herd_system<T: TerrainHeightQuery + Send + Sync + 'static>(
    time: Res<Time>,
    herd: Option<ResMut<Herd<T>>>,
    players: Query<&Transform, With<Player>>,
) {
    let Some(mut controller) = herd else {
        return;
    };
    let Ok(player) = players.single() else {
        trace!("no single player entity; herd left untouched");
        return;
    };
    controller.update(time.delta_secs(), player.translation);
}

/// Copies animal poses onto their entities' transforms.
///
/// Entities whose animal has been unregistered keep their last transform.
pub fn sync_animal_transforms_system<T: TerrainHeightQuery + Send + Sync + 'static>(
    herd: Option<Res<Herd<T>>>,
    mut animals: Query<(&AnimalHandle, &mut Transform), Without<Player>>,
) {
    let Some(controller) = herd else {
        return;
    };
    for (handle, mut transform) in &mut animals {
        let (Some(position), Some(heading)) =
            (controller.position(handle.0), controller.heading(handle.0))
        else {
            continue;
        };
        transform.translation = position;
        transform.rotation = Quat::from_rotation_y(heading);
    }
}

/// Installs the herd systems for terrain type `T`.
pub struct AnimalBehaviourPlugin<T> {
    terrain: PhantomData<fn() -> T>,
}

impl<T> Default for AnimalBehaviourPlugin<T> {
    fn default() -> Self {
        Self {
            terrain: PhantomData,
        }
    }
}

impl<T: TerrainHeightQuery + Send + Sync + 'static> Plugin for AnimalBehaviourPlugin<T> {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                drive_herd_system::<T>,
                sync_animal_transforms_system::<T>,
            )
                .chain(),
        );
    }
}
