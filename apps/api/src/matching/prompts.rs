use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, RECRUITER_PERSONA};
use crate::models::{ScrapedJob, UserPreferences};

const MAX_DESCRIPTION_CHARS: usize = 500;

pub fn match_system_prompt() -> String {
    format!("{RECRUITER_PERSONA} {JSON_ONLY_SYSTEM}")
}

/// Builds the scoring prompt for one batch of postings.
pub fn build_match_prompt(jobs: &[ScrapedJob], prefs: &UserPreferences) -> String {
    let listings = jobs
        .iter()
        .map(|job| {
            let description: String = job.description.chars().take(MAX_DESCRIPTION_CHARS).collect();
            format!(
                "- id: {}\n  title: {}\n  company: {}\n  location: {}\n  remote: {}\n  type: {}\n  function: {}\n  description: {}",
                job.id,
                job.title,
                job.company,
                job.location,
                job.is_remote,
                job.job_type,
                job.job_function,
                description.replace('\n', " "),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Score how well each job posting matches the candidate's preferences.\n\
         \n\
         CANDIDATE PREFERENCES:\n\
         - Job function: {function}\n\
         - Job type: {job_type}\n\
         - Location: {location}\n\
         - Open to remote: {remote}\n\
         - Needs visa sponsorship: {sponsorship}\n\
         \n\
         SCORING WEIGHTS (0-100 total):\n\
         - 80%: relevance of the role's function and title to the preferred job function\n\
         - 5%: job type match\n\
         - 10%: location match, or remote availability when the candidate is open to remote\n\
         - 5%: overall fit\n\
         \n\
         JOB POSTINGS:\n\
         {listings}\n\
         \n\
         Return a JSON array with one object per posting scoring 70 or higher:\n\
         [{{\"id\": <posting id>, \"score\": <0-100>, \"reason\": \"<one sentence>\"}}]\n\
         Return [] if no posting scores 70 or higher.",
        function = prefs.job_function,
        job_type = prefs.job_type,
        location = prefs.location,
        remote = prefs.open_to_remote,
        sponsorship = prefs.needs_sponsorship,
    )
}
