use serde::{Deserialize, Deserializer, Serialize};

/// One scraped job offer as pushed by the backend.
///
/// `title` is the only field an object must carry to count as a job record.
/// Everything else defaults to empty text, and JSON `null` is read as empty
/// text because the producer emits it for optional columns.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    #[serde(default, deserialize_with = "nullable_text")]
    pub location: String,
    #[serde(default, deserialize_with = "nullable_text")]
    pub company_name: String,
    #[serde(default, deserialize_with = "nullable_text")]
    pub cv_path: String,
    #[serde(default, deserialize_with = "nullable_text")]
    pub job_url: String,
    #[serde(default, deserialize_with = "nullable_text")]
    pub company_url: String,
    #[serde(default, deserialize_with = "nullable_text")]
    pub contract_type: String,
    #[serde(default, deserialize_with = "nullable_text")]
    pub employment_type: String,
    #[serde(default, deserialize_with = "nullable_text")]
    pub work_arrangement: String,
    #[serde(default, deserialize_with = "nullable_text")]
    pub requirements: String,
    #[serde(default, deserialize_with = "nullable_text")]
    pub duties: String,
    #[serde(default, deserialize_with = "nullable_text")]
    pub about_project: String,
    #[serde(default, deserialize_with = "nullable_text")]
    pub offer_benefits: String,
    #[serde(default, deserialize_with = "nullable_text")]
    pub additional_information: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_letter_path: Option<String>,
    /// ISO date the producer found the offer on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discovery_date: Option<String>,
}

impl JobRecord {
    /// Convenience constructor used by producers and tests.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

fn nullable_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
