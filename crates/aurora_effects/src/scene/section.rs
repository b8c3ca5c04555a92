//! The six page sections and what each one mounts.

use aurora_core::{palette, streams, HoverId, ParamSampler, PopulationConfig, Vec3};

use super::Camera;
use crate::atmosphere::{Environment, Fog, Lighting, PointLight};
use crate::systems::{about, contact, hero, service, space, work};
use crate::updater::InstanceUpdater;

/// A page section with its own scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Fixed full-page space background.
    Space,
    /// Landing hero with the AI core.
    Hero,
    /// Neural network behind the about text.
    About,
    /// Warp tunnel behind the work history.
    Work,
    /// Particle vortex behind the contact form.
    Contact,
    /// Hologram shapes behind the services list.
    Service,
}

impl Section {
    /// Every section, in page order.
    pub const ALL: [Self; 6] = [
        Self::Space,
        Self::Hero,
        Self::About,
        Self::Work,
        Self::Contact,
        Self::Service,
    ];

    /// Short lowercase name for logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Space => "space",
            Self::Hero => "hero",
            Self::About => "about",
            Self::Work => "work",
            Self::Contact => "contact",
            Self::Service => "service",
        }
    }

    /// Section camera.
    #[must_use]
    pub const fn camera(self) -> Camera {
        match self {
            Self::Space => Camera::new(15.0, 60.0),
            Self::Hero => Camera::new(4.0, 60.0),
            Self::About | Self::Work | Self::Contact => Camera::new(5.0, 60.0),
            Self::Service => Camera::new(6.0, 60.0),
        }
    }

    /// Hover targets the section registers on the signal bus.
    #[must_use]
    pub const fn hover_targets(self) -> usize {
        match self {
            Self::Hero => 1,
            Self::Service => service::HOLOGRAMS.len(),
            _ => 0,
        }
    }

    /// Background, fog, lights and group rotation.
    #[must_use]
    pub fn environment(self) -> Environment {
        match self {
            Self::Space => Environment::lit(Lighting::ambient(0.05))
                .with_background(palette::VOID)
                .with_fog(Fog::linear(palette::VOID, 30.0, 80.0)),
            Self::Hero => Environment::lit(
                Lighting::ambient(0.15)
                    .with_point(PointLight::new(Vec3::new(5.0, 5.0, 5.0), palette::CYAN, 1.5))
                    .with_point(PointLight::new(Vec3::new(-5.0, -3.0, 3.0), palette::PURPLE, 0.8))
                    .with_point(PointLight::new(Vec3::new(0.0, 0.0, 3.0), palette::WHITE, 0.5)),
            ),
            Self::About => Environment::lit(
                Lighting::ambient(0.1)
                    .with_point(PointLight::new(Vec3::new(3.0, 3.0, 3.0), palette::CYAN, 0.5))
                    .with_point(PointLight::new(Vec3::new(-3.0, -2.0, 2.0), palette::PURPLE, 0.3)),
            )
            .with_group_rotation(Vec3::new(0.3, 0.0, 0.1)),
            Self::Work => Environment::lit(Lighting::ambient(0.05))
                .with_fog(Fog::linear(palette::VOID, 5.0, 20.0)),
            Self::Contact => Environment::lit(
                Lighting::ambient(0.05)
                    .with_point(PointLight::new(Vec3::new(0.0, 0.0, 3.0), palette::CYAN, 0.5)),
            )
            .with_group_rotation(Vec3::new(0.3, 0.0, 0.0)),
            Self::Service => Environment::lit(
                Lighting::ambient(0.3)
                    .with_point(PointLight::new(Vec3::new(10.0, 10.0, 10.0), palette::CYAN, 0.5))
                    .with_point(PointLight::new(Vec3::new(-10.0, -5.0, 5.0), palette::PURPLE, 0.3)),
            ),
        }
    }

    /// Builds fresh updaters with parameter sets sampled under `seed`.
    ///
    /// `hovers` supplies the ids for hoverable systems in order; missing ids
    /// leave those systems permanently unhovered.
    #[must_use]
    pub fn build(
        self,
        populations: &PopulationConfig,
        seed: u64,
        hovers: &[HoverId],
    ) -> Vec<Box<dyn InstanceUpdater>> {
        let sampler = |stream| ParamSampler::new(seed, stream);

        match self {
            Self::Space => vec![
                Box::new(space::Starfield::new(
                    populations.starfield,
                    &mut sampler(streams::STARFIELD),
                )),
                Box::new(space::NebulaClouds::new(
                    populations.nebula,
                    &mut sampler(streams::NEBULA),
                )),
                Box::new(space::ShootingStars::new(
                    populations.shooting_stars,
                    &mut sampler(streams::SHOOTING_STARS),
                )),
                Box::new(space::MouseSpotlight::new()),
            ],
            Self::Hero => {
                let mut updaters: Vec<Box<dyn InstanceUpdater>> =
                    vec![Box::new(hero::AiCore::new(hovers.first().copied()))];
                for (index, spec) in hero::HERO_RINGS.into_iter().enumerate() {
                    updaters.push(Box::new(hero::OrbitRing::new(
                        index,
                        spec,
                        populations.orbit_particles,
                    )));
                }
                updaters.push(Box::new(hero::ElectricalArcs::new(populations.arcs)));
                updaters.push(Box::new(hero::FloatingNodes::new(
                    populations.floating_nodes,
                    &mut sampler(streams::FLOATING_NODES),
                )));
                updaters
            }
            Self::About => {
                let nodes = about::NetworkNodes::new(
                    populations.network_nodes,
                    &mut sampler(streams::NETWORK_NODES),
                );
                let connections = about::Connections::new(
                    populations.connection_attempts,
                    nodes.bases(),
                    &mut sampler(streams::CONNECTIONS),
                );
                vec![
                    Box::new(nodes),
                    Box::new(connections),
                    Box::new(about::DataPulses::new(
                        populations.data_pulses,
                        &mut sampler(streams::DATA_PULSES),
                    )),
                ]
            }
            Self::Work => vec![
                Box::new(work::WarpTunnel::new(
                    populations.warp_particles,
                    &mut sampler(streams::WARP_TUNNEL),
                )),
                Box::new(work::TunnelRings::new(populations.tunnel_rings)),
                Box::new(work::DataCubes::new(
                    populations.data_cubes,
                    &mut sampler(streams::DATA_CUBES),
                )),
            ],
            Self::Contact => vec![
                Box::new(contact::ParticleVortex::new(
                    populations.vortex,
                    &mut sampler(streams::VORTEX),
                )),
                Box::new(contact::AccentParticles::new(
                    populations.accent,
                    &mut sampler(streams::ACCENT),
                )),
                Box::new(contact::VortexCore::new()),
            ],
            Self::Service => {
                let mut floats = sampler(streams::HOLOGRAMS);
                let mut updaters: Vec<Box<dyn InstanceUpdater>> =
                    vec![Box::new(service::DataStream::new(
                        populations.data_stream,
                        &mut sampler(streams::DATA_STREAM),
                    ))];
                for (index, spec) in service::HOLOGRAMS.into_iter().enumerate() {
                    updaters.push(Box::new(service::HologramShape::new(
                        spec,
                        hovers.get(index).copied(),
                        &mut floats,
                    )));
                }
                updaters
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_section_builds() {
        let populations = PopulationConfig::default();
        for section in Section::ALL {
            let updaters = section.build(&populations, 1, &[]);
            assert!(!updaters.is_empty(), "{section:?}");
            assert!(section.camera().is_valid());
        }
    }

    #[test]
    fn test_system_rosters() {
        let populations = PopulationConfig::default();
        let names = |section: Section| -> Vec<&'static str> {
            section
                .build(&populations, 1, &[])
                .iter()
                .map(|u| u.name())
                .collect()
        };

        assert_eq!(
            names(Section::Space),
            ["starfield", "nebula_clouds", "shooting_stars", "mouse_spotlight"]
        );
        assert_eq!(names(Section::Hero).len(), 6);
        assert_eq!(
            names(Section::Work),
            ["warp_tunnel", "tunnel_rings", "data_cubes"]
        );
        assert_eq!(names(Section::Service).len(), 7);
    }

    #[test]
    fn test_environments() {
        let space = Section::Space.environment();
        assert_eq!(space.background, Some(palette::rgb(palette::VOID)));
        assert_eq!(space.fog.map(|f| f.far), Some(80.0));
        assert_eq!(Section::Hero.environment().lighting.points.len(), 3);
        assert_eq!(
            Section::Contact.environment().group_rotation,
            Vec3::new(0.3, 0.0, 0.0)
        );
    }
}
