use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

/// Treats an explicit `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

id_newtype!(AssetId);
id_newtype!(ScanId);

/// One host as reported by the backend inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hostname: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ipv4s: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub risk_score: f64,
    #[serde(
        default,
        rename = "critical_vulns",
        deserialize_with = "null_as_default"
    )]
    pub critical: u32,
    #[serde(default, rename = "high_vulns", deserialize_with = "null_as_default")]
    pub high: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub operating_system: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleKind {
    Once,
    Daily,
    Weekly,
}

impl ScheduleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Once => "once",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }
}

impl fmt::Display for ScheduleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When a scheduled scan fires. `day` is only set for weekly schedules and
/// `date` only for one-off schedules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(rename = "type")]
    pub kind: ScheduleKind,
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    pub time: String,
}

impl Schedule {
    /// Human readable form used by the index page, e.g. `weekly Sunday 02:00`.
    pub fn describe(&self) -> String {
        match (self.kind, self.day.as_deref(), self.date.as_deref()) {
            (ScheduleKind::Weekly, Some(day), _) => format!("weekly {day} {}", self.time),
            (ScheduleKind::Once, _, Some(date)) => format!("once {date} {}", self.time),
            (kind, _, _) => format!("{kind} {}", self.time),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledScan {
    pub id: ScanId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub targets: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub expanded_target_count: u32,
    pub schedule: Schedule,
    #[serde(default)]
    pub next_run_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enabled: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
}
