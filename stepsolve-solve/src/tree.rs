//! An index arena over a parsed value, used to replay a local rewrite up to the root.
//!
//! A rewrite rule finds its pattern somewhere inside an equation: a fraction three levels down,
//! one term of a nested sum. [`Tree::consider_replacement`] takes the rewritten particle for one
//! node and rebuilds every ancestor around it, producing a whole new [`Algebra`] without
//! mutating anything. Parent links are indices into the arena, never owning references.

use stepsolve_parser::particle::{Algebra, Equation, Particle};

/// One arena node: a particle, where it sits, and how deep it is.
struct Node {
    particle: Particle,
    parent: Option<usize>,
    children: Vec<usize>,
    depth: u32,
}

/// An arena of every particle in an [`Algebra`], in pre-order.
pub struct Tree {
    algebra: Algebra,
    nodes: Vec<Node>,
    /// Arena indices of the top-level particles: both equation sides, or the lone particle.
    roots: Vec<usize>,
}

impl Tree {
    pub fn new(algebra: &Algebra) -> Tree {
        let mut tree = Tree {
            algebra: algebra.clone(),
            nodes: Vec::new(),
            roots: Vec::new(),
        };
        match algebra {
            Algebra::Equation(equation) => {
                let left = tree.insert(&equation.left, None, 0);
                let right = tree.insert(&equation.right, None, 0);
                tree.roots = vec![left, right];
            },
            Algebra::Particle(particle) => {
                let root = tree.insert(particle, None, 0);
                tree.roots = vec![root];
            },
        }
        tree
    }

    fn insert(&mut self, particle: &Particle, parent: Option<usize>, depth: u32) -> usize {
        let id = self.nodes.len();
        self.nodes.push(Node {
            particle: particle.clone(),
            parent,
            children: Vec::new(),
            depth,
        });
        for child in particle.children() {
            let child_id = self.insert(child, Some(id), depth + 1);
            self.nodes[id].children.push(child_id);
        }
        id
    }

    pub fn particle(&self, id: usize) -> &Particle {
        &self.nodes[id].particle
    }

    pub fn depth(&self, id: usize) -> u32 {
        self.nodes[id].depth
    }

    pub fn parent(&self, id: usize) -> Option<usize> {
        self.nodes[id].parent
    }

    /// Every node in pre-order: parents before children, left to right.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Particle)> {
        self.nodes.iter().enumerate().map(|(id, node)| (id, &node.particle))
    }

    /// The deepest node whose particle matches, ties broken toward pre-order. Rules rewrite the
    /// deepest match first so inner structure is settled before outer structure.
    pub fn deepest_match(&self, mut matches: impl FnMut(&Particle) -> bool) -> Option<usize> {
        self.iter()
            .filter(|(_, particle)| matches(particle))
            .max_by_key(|&(id, _)| (self.nodes[id].depth, std::cmp::Reverse(id)))
            .map(|(id, _)| id)
    }

    /// Replaces the particle at `id` with a new value and rebuilds every ancestor around the
    /// change, returning the resulting whole value. The tree itself is unchanged; call sites
    /// that want to explore several replacements reuse one tree.
    pub fn consider_replacement(&self, id: usize, new_value: Particle) -> Algebra {
        let mut current = new_value;
        let mut child = id;
        while let Some(parent) = self.nodes[child].parent {
            let children = self.nodes[parent]
                .children
                .iter()
                .map(|&c| {
                    if c == child {
                        current.clone()
                    } else {
                        self.nodes[c].particle.clone()
                    }
                })
                .collect();
            current = self.nodes[parent].particle.with_children(children);
            child = parent;
        }

        match &self.algebra {
            Algebra::Equation(equation) => {
                if child == self.roots[0] {
                    Algebra::Equation(Equation::new(current, equation.right.clone()))
                } else {
                    Algebra::Equation(Equation::new(equation.left.clone(), current))
                }
            },
            Algebra::Particle(_) => Algebra::Particle(current),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use stepsolve_parser::particle::{self, parse_algebra, Exclusions};

    fn tree_of(source: &str) -> Tree {
        Tree::new(&parse_algebra(source).unwrap())
    }

    #[test]
    fn replacement_replays_to_the_root() {
        let tree = tree_of("2x+7=(1)/(2)");
        let two = particle::parse("2", Exclusions::NONE).unwrap();
        let (id, _) = tree
            .iter()
            .find(|(_, p)| p.to_string() == "7")
            .unwrap();
        let rebuilt = tree.consider_replacement(id, two);
        assert_eq!(rebuilt.to_string(), "2x+2=(1)/(2)");
    }

    #[test]
    fn replacement_keeps_sum_structure() {
        let tree = tree_of("2x+7");
        let (id, _) = tree
            .iter()
            .find(|(_, p)| p.to_string() == "2x")
            .unwrap();
        let zero = particle::parse("0", Exclusions::NONE).unwrap();
        let rebuilt = tree.consider_replacement(id, zero);
        assert!(matches!(rebuilt, Algebra::Particle(Particle::Expression(_))));
        assert_eq!(rebuilt.to_string(), "0+7");
    }

    #[test]
    fn deepest_match_prefers_inner_structure() {
        let tree = tree_of("((1)/(2))/(3)");
        let id = tree
            .deepest_match(|p| p.as_fraction().is_some())
            .unwrap();
        assert_eq!(tree.particle(id).to_string(), "(1)/(2)");
    }

    /// Replaying a change and editing the rendered text directly must agree.
    #[test]
    fn replay_matches_textual_substitution() {
        let algebra = parse_algebra("2x+√(y+1)=4").unwrap();
        let tree = Tree::new(&algebra);
        let replacement = particle::parse("z", Exclusions::NONE).unwrap();
        let (id, _) = tree
            .iter()
            .find(|(_, p)| p.to_string() == "y+1")
            .unwrap();

        let rebuilt = tree.consider_replacement(id, replacement);
        let textual = algebra.to_string().replace("y+1", "z");
        assert_eq!(rebuilt.to_string(), parse_algebra(&textual).unwrap().to_string());
    }
}
