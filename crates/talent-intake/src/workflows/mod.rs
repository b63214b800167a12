pub mod intake;
pub mod questionnaire;
