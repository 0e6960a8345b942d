use crate::solver::classifier::{Analysis, Topic};
use crate::solver::errors::SolverError;
use crate::solver::question::Question;
use crate::solver::types::SolverResponse;
use crate::solver::{gas_laws, generic_topics, stoichiometry};
use enum_dispatch::enum_dispatch;

/// Per-topic analysis and solving
#[enum_dispatch]
pub trait TopicSolver {
    fn topic(&self) -> Topic;
    /// extracts the variable bag and picks the problem type
    fn analyze(&self, question: &Question) -> Analysis;
    fn solve(&self, question: &Question, analysis: &Analysis) -> Result<SolverResponse, SolverError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GasLawSolver;
#[derive(Debug, Clone, Copy, Default)]
pub struct StoichiometrySolver;
#[derive(Debug, Clone, Copy, Default)]
pub struct PhSolver;
#[derive(Debug, Clone, Copy, Default)]
pub struct ConcentrationSolver;
#[derive(Debug, Clone, Copy, Default)]
pub struct ThermochemistrySolver;
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneralSolver;

impl TopicSolver for GasLawSolver {
    fn topic(&self) -> Topic {
        Topic::GasLaws
    }
    fn analyze(&self, question: &Question) -> Analysis {
        gas_laws::analyze(question)
    }
    fn solve(&self, question: &Question, analysis: &Analysis) -> Result<SolverResponse, SolverError> {
        gas_laws::solve_gas_law(question, analysis)
    }
}

impl TopicSolver for StoichiometrySolver {
    fn topic(&self) -> Topic {
        Topic::Stoichiometry
    }
    fn analyze(&self, question: &Question) -> Analysis {
        stoichiometry::analyze(question)
    }
    fn solve(&self, question: &Question, analysis: &Analysis) -> Result<SolverResponse, SolverError> {
        stoichiometry::solve_stoichiometry(question, analysis)
    }
}

macro_rules! outline_solver {
    ($solver:ty, $topic:expr) => {
        impl TopicSolver for $solver {
            fn topic(&self) -> Topic {
                $topic
            }
            fn analyze(&self, question: &Question) -> Analysis {
                generic_topics::analyze($topic, question)
            }
            fn solve(
                &self,
                question: &Question,
                analysis: &Analysis,
            ) -> Result<SolverResponse, SolverError> {
                Ok(generic_topics::solve_topic(question, analysis))
            }
        }
    };
}

outline_solver!(PhSolver, Topic::Ph);
outline_solver!(ConcentrationSolver, Topic::Concentration);
outline_solver!(ThermochemistrySolver, Topic::Thermochemistry);
outline_solver!(GeneralSolver, Topic::GeneralChemistry);

#[derive(Debug, Clone, Copy)]
#[enum_dispatch(TopicSolver)]
pub enum TopicHandler {
    GasLawSolver(GasLawSolver),
    StoichiometrySolver(StoichiometrySolver),
    PhSolver(PhSolver),
    ConcentrationSolver(ConcentrationSolver),
    ThermochemistrySolver(ThermochemistrySolver),
    GeneralSolver(GeneralSolver),
}

impl TopicHandler {
    pub fn for_topic(topic: Topic) -> TopicHandler {
        match topic {
            Topic::GasLaws => GasLawSolver.into(),
            Topic::Stoichiometry => StoichiometrySolver.into(),
            Topic::Ph => PhSolver.into(),
            Topic::Concentration => ConcentrationSolver.into(),
            Topic::Thermochemistry => ThermochemistrySolver.into(),
            Topic::GeneralChemistry => GeneralSolver.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_topic_has_its_handler() {
        for topic in Topic::ALL {
            let handler = TopicHandler::for_topic(topic);
            assert_eq!(handler.topic(), topic);
            let analysis = handler.analyze(&Question::new("", None));
            assert_eq!(analysis.topic, topic);
        }
    }
}
