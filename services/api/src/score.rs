use clap::Args;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::PathBuf;
use talent_intake::error::AppError;
use talent_intake::workflows::intake::IntakeError;
use talent_intake::workflows::questionnaire::{
    aggregate, build_candidate_payload, AnswerSet, ApplicantProfile, CandidateFieldPayload,
};

#[derive(Args, Debug, Default)]
pub(crate) struct ScoreArgs {
    /// Path to a JSON file holding the submission (profile fields plus an
    /// "answers" map of question id to rating). Reads stdin when omitted.
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
    /// Inline JSON submission, handy for one-off checks.
    #[arg(long, conflicts_with = "input")]
    pub(crate) json: Option<String>,
}

/// Offline submission shape: the same body the HTTP endpoint accepts,
/// minus the routing-only fields.
#[derive(Debug, Deserialize)]
pub(crate) struct ScoreRequest {
    #[serde(flatten)]
    pub(crate) profile: ApplicantProfile,
    pub(crate) answers: AnswerSet,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreReport {
    pub(crate) trait_scores: BTreeMap<&'static str, String>,
    pub(crate) fields: CandidateFieldPayload,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let raw = match (args.json, args.input) {
        (Some(json), _) => json,
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let request: ScoreRequest = serde_json::from_str(&raw)?;
    let report = evaluate(request)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub(crate) fn evaluate(request: ScoreRequest) -> Result<ScoreReport, AppError> {
    let scores = aggregate(&request.answers).map_err(IntakeError::from)?;
    let fields = build_candidate_payload(&scores, &request.profile).map_err(IntakeError::from)?;

    Ok(ScoreReport {
        trait_scores: scores.formatted_map(),
        fields,
    })
}
