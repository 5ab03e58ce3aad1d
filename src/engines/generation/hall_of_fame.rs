use crate::types::Program;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EliteProgram {
    pub program: Program,
    pub fitness: f64,
    pub generation: usize,
    pub canonical_string: String, // For deduplication
}

impl EliteProgram {
    pub fn new(program: Program, fitness: f64, generation: usize) -> Self {
        let canonical_string = program.to_string();
        Self {
            program,
            fitness,
            generation,
            canonical_string,
        }
    }
}

/// Best distinct programs seen so far, highest fitness first
pub struct HallOfFame {
    programs: Vec<EliteProgram>,
    max_size: usize,
    seen_signatures: HashSet<String>,
}

impl HallOfFame {
    pub fn new(max_size: usize) -> Self {
        Self {
            programs: Vec::new(),
            max_size,
            seen_signatures: HashSet::new(),
        }
    }

    /// Attempt to add a program; returns whether it is still a member afterwards.
    /// Duplicates, non-finite fitness and programs below a full roster are rejected.
    pub fn try_add(&mut self, elite: EliteProgram) -> bool {
        if self.max_size == 0 || !elite.fitness.is_finite() {
            return false;
        }
        if self.seen_signatures.contains(&elite.canonical_string) {
            return false;
        }

        let signature = elite.canonical_string.clone();
        self.seen_signatures.insert(signature.clone());
        self.programs.push(elite);

        self.programs.sort_by(|a, b| {
            b.fitness.partial_cmp(&a.fitness).unwrap_or(std::cmp::Ordering::Equal)
        });

        while self.programs.len() > self.max_size {
            if let Some(removed) = self.programs.pop() {
                self.seen_signatures.remove(&removed.canonical_string);
            }
        }

        self.seen_signatures.contains(&signature)
    }

    pub fn get_all(&self) -> &[EliteProgram] {
        &self.programs
    }

    pub fn best(&self) -> Option<&EliteProgram> {
        self.programs.first()
    }

    pub fn get_top_n(&self, n: usize) -> &[EliteProgram] {
        &self.programs[..n.min(self.programs.len())]
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}
