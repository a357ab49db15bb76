//! Resolved handles the controller drives.

use crate::error::{Error, Reference, Result};

/// The rigid body, transforms and ground probe of one player.
///
/// Built with [`PlayerRig::builder`]; a rig always holds every handle.
#[derive(Debug)]
pub struct PlayerRig<B, T, C, P> {
    pub body: B,
    pub transform: T,
    pub camera: C,
    pub ground_probe: P,
}

impl PlayerRig<(), (), (), ()> {
    /// Start assembling a rig.
    pub fn builder<B, T, C, P>() -> PlayerRigBuilder<B, T, C, P> {
        PlayerRigBuilder::default()
    }
}

/// Collects handles and checks that none are missing.
///
/// Each setter takes either the handle or an `Option` of it, so lookups that
/// may fail can be passed straight through. Passing `Option`s needs the handle
/// types spelled out on [`PlayerRig::builder`].
#[derive(Debug)]
pub struct PlayerRigBuilder<B, T, C, P> {
    body: Option<B>,
    transform: Option<T>,
    camera: Option<C>,
    ground_probe: Option<P>,
}

impl<B, T, C, P> Default for PlayerRigBuilder<B, T, C, P> {
    fn default() -> Self {
        Self {
            body: None,
            transform: None,
            camera: None,
            ground_probe: None,
        }
    }
}

impl<B, T, C, P> PlayerRigBuilder<B, T, C, P> {
    pub fn body(mut self, body: impl Into<Option<B>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn transform(mut self, transform: impl Into<Option<T>>) -> Self {
        self.transform = transform.into();
        self
    }

    pub fn camera(mut self, camera: impl Into<Option<C>>) -> Self {
        self.camera = camera.into();
        self
    }

    pub fn ground_probe(mut self, ground_probe: impl Into<Option<P>>) -> Self {
        self.ground_probe = ground_probe.into();
        self
    }

    /// Finish the rig, failing on the first missing handle.
    pub fn build(self) -> Result<PlayerRig<B, T, C, P>> {
        Ok(PlayerRig {
            body: self
                .body
                .ok_or(Error::MissingReference(Reference::RigidBody))?,
            transform: self
                .transform
                .ok_or(Error::MissingReference(Reference::Transform))?,
            camera: self
                .camera
                .ok_or(Error::MissingReference(Reference::Camera))?,
            ground_probe: self
                .ground_probe
                .ok_or(Error::MissingReference(Reference::GroundProbe))?,
        })
    }
}
