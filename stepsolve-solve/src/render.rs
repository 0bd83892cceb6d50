//! A memo for rendered particles.
//!
//! The solver compares candidate rewrites by their rendered text, and the same particles come up
//! over and over across branches. Particles are immutable, so a global map from particle to its
//! rendering is safe to share.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::RwLock;
use stepsolve_parser::particle::Particle;

static CACHE: Lazy<RwLock<HashMap<Particle, String>>> = Lazy::new(|| RwLock::new(HashMap::new()));

/// Renders a particle, reusing a previous rendering of an equal particle when one exists.
pub fn cached(particle: &Particle) -> String {
    if let Ok(cache) = CACHE.read() {
        if let Some(rendered) = cache.get(particle) {
            return rendered.clone();
        }
    }

    let rendered = particle.to_string();
    if let Ok(mut cache) = CACHE.write() {
        cache.insert(particle.clone(), rendered.clone());
    }
    rendered
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use stepsolve_parser::particle::{self, Exclusions};

    #[test]
    fn cached_rendering_matches_display() {
        let particle = particle::parse("2x+7", Exclusions::NONE).unwrap();
        assert_eq!(cached(&particle), particle.to_string());
        // and again, now out of the cache
        assert_eq!(cached(&particle), "2x+7");
    }
}
