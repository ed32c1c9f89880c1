use crate::{ConnectionId, JobRecord, SessionState};

pub const START_LABEL: &str = "Start job search";
pub const STOP_LABEL: &str = "Stop job search";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusIndicator {
    Alive,
    #[default]
    Dead,
}

/// Everything the status line and the toggle control show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub session: SessionState,
    pub indicator: StatusIndicator,
    pub toggle_label: &'static str,
    pub active_connection: Option<ConnectionId>,
    pub rendered_jobs: usize,
    pub dropped_events: usize,
}

impl Default for SessionView {
    fn default() -> Self {
        crate::AppState::default().view()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySection {
    pub label: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryLink {
    pub label: &'static str,
    pub target: String,
}

/// Displayable form of one job record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobEntry {
    pub title: String,
    /// `company · location`, skipping whichever part is empty.
    pub heading: String,
    pub discovered: Option<String>,
    pub sections: Vec<EntrySection>,
    pub links: Vec<EntryLink>,
}

impl JobEntry {
    pub fn from_record(job: &JobRecord) -> Self {
        let heading = [job.company_name.trim(), job.location.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" · ");

        let sections = [
            ("Contract", &job.contract_type),
            ("Employment", &job.employment_type),
            ("Work arrangement", &job.work_arrangement),
            ("Requirements", &job.requirements),
            ("Duties", &job.duties),
            ("About the project", &job.about_project),
            ("Benefits", &job.offer_benefits),
            ("Additional information", &job.additional_information),
        ]
        .into_iter()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(label, text)| EntrySection {
            label,
            text: text.trim().to_string(),
        })
        .collect();

        let cover_letter = job.cover_letter_path.as_deref().unwrap_or_default();
        let links = [
            ("Job offer", job.job_url.as_str()),
            ("Company", job.company_url.as_str()),
            ("CV", job.cv_path.as_str()),
            ("Cover letter", cover_letter),
        ]
        .into_iter()
        .filter(|(_, target)| !target.trim().is_empty())
        .map(|(label, target)| EntryLink {
            label,
            target: target.trim().to_string(),
        })
        .collect();

        Self {
            title: job.title.trim().to_string(),
            heading,
            discovered: job
                .discovery_date
                .as_deref()
                .map(str::trim)
                .filter(|date| !date.is_empty())
                .map(ToOwned::to_owned),
            sections,
            links,
        }
    }
}
