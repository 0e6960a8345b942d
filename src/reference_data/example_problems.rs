//! Read-only library of worked example problems.
//!
//! The built-in problems are embedded at compile time from `example_problems.json`.
//! A user file named in the settings can add problems or replace built-in ones with the same id.
use crate::settings::ConfigError;
use crate::solver::types::{Difficulty, ExampleProblem};
use log::{info, warn};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

pub const BUILTIN_EXAMPLES: &str = include_str!("example_problems.json");

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExampleLibrary {
    problems: Vec<ExampleProblem>,
}

impl ExampleLibrary {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let problems: Vec<ExampleProblem> = serde_json::from_str(json)?;
        Ok(Self { problems })
    }

    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_EXAMPLES).expect("embedded example library is valid JSON")
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        if !Path::new(path).exists() {
            return Err(ConfigError::MissingFile(path.to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn all(&self) -> &[ExampleProblem] {
        &self.problems
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn by_id(&self, id: &str) -> Option<&ExampleProblem> {
        self.problems.iter().find(|p| p.id == id)
    }

    pub fn by_topic(&self, topic_id: &str) -> Vec<&ExampleProblem> {
        self.problems.iter().filter(|p| p.topic_id == topic_id).collect()
    }

    pub fn by_tag(&self, tag: &str) -> Vec<&ExampleProblem> {
        self.problems
            .iter()
            .filter(|p| p.tags.iter().any(|t| t == tag))
            .collect()
    }

    pub fn by_difficulty(&self, difficulty: Difficulty) -> Vec<&ExampleProblem> {
        self.problems
            .iter()
            .filter(|p| p.difficulty == difficulty)
            .collect()
    }

    /// Problems of `other` replace ours with the same id, new ids are appended in file order
    pub fn merge(&mut self, other: ExampleLibrary) {
        for problem in other.problems {
            match self.problems.iter_mut().find(|p| p.id == problem.id) {
                Some(existing) => *existing = problem,
                None => self.problems.push(problem),
            }
        }
    }
}

static BUILTIN_LIBRARY: OnceLock<ExampleLibrary> = OnceLock::new();

pub fn builtin_examples() -> &'static ExampleLibrary {
    BUILTIN_LIBRARY.get_or_init(ExampleLibrary::builtin)
}

/// Built-in problems merged with the optional user file. A file that cannot be read or
/// parsed is reported and ignored.
pub fn load_examples(override_file: Option<&str>) -> ExampleLibrary {
    let mut library = builtin_examples().clone();
    if let Some(path) = override_file {
        match ExampleLibrary::from_file(path) {
            Ok(extra) => {
                info!("loaded {} example problems from {}", extra.len(), path);
                library.merge(extra);
            }
            Err(err) => warn!("ignoring example file {}: {}", path, err),
        }
    }
    library
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::ChemistrySolver;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const USER_EXAMPLES: &str = r#"[
        {
            "id": "boyle-compression",
            "topicId": "gas-laws",
            "title": "Boyle's Law - Piston",
            "question": "A piston holds 4.0 L of gas at 1.0 atm. What is the new pressure at 2.0 L and constant temperature?",
            "variables": {},
            "solution": [],
            "difficulty": "beginner",
            "tags": ["boyles-law"]
        },
        {
            "id": "methane-water",
            "topicId": "stoichiometry",
            "title": "Methane Combustion - Water",
            "question": "How many grams of H2O are produced when 8.0 g of methane (CH4) burns completely?",
            "variables": {},
            "solution": [],
            "difficulty": "intermediate",
            "tags": ["combustion", "water"]
        }
    ]"#;

    #[test]
    fn test_builtin_library() {
        let library = builtin_examples();
        assert_eq!(library.len(), 5);
        assert!(library.by_id("propane-combustion").is_some());
        assert!(library.by_id("nope").is_none());
        assert_eq!(library.by_topic("gas-laws").len(), 3);
        assert_eq!(library.by_topic("stoichiometry").len(), 2);
        assert_eq!(library.by_tag("propane").len(), 2);
        assert_eq!(library.by_difficulty(Difficulty::Advanced).len(), 1);
        for problem in library.all() {
            for (i, step) in problem.solution.iter().enumerate() {
                assert_eq!(step.step_number, i + 1);
            }
        }
    }

    #[test]
    fn test_builtin_questions_are_solvable() {
        let solver = ChemistrySolver::new();
        for problem in builtin_examples().all() {
            let response = solver.solve(&problem.question, Some(&problem.topic_id));
            assert!(response.success, "{} failed: {:?}", problem.id, response.error);
        }
        let boyle = builtin_examples().by_id("boyle-compression").unwrap();
        let response = solver.solve(&boyle.question, None);
        assert!(response.final_answer.contains("4.00 atm"));
    }

    #[test]
    fn test_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(USER_EXAMPLES.as_bytes()).unwrap();
        let library = load_examples(Some(file.path().to_str().unwrap()));
        assert_eq!(library.len(), 6);
        assert_eq!(library.by_id("boyle-compression").unwrap().title, "Boyle's Law - Piston");
        assert_eq!(library.all().last().unwrap().id, "methane-water");
        assert_eq!(builtin_examples().len(), 5);
    }

    #[test]
    fn test_bad_override_falls_back() {
        assert_eq!(&load_examples(Some("missing_examples.json")), builtin_examples());
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not a list }").unwrap();
        let path = file.path().to_str().unwrap();
        assert!(matches!(ExampleLibrary::from_file(path), Err(ConfigError::Json(_))));
        assert_eq!(load_examples(Some(path)).len(), 5);
    }
}
