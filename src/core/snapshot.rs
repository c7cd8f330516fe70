use crate::domain::model::{
    LegacySnapshot, LegacySource, MenuResult, Snapshot, SnapshotFormat, SnapshotMeta, WriteOutcome,
};
use crate::domain::ports::Storage;
use crate::parse::weekday::weekday_index;
use crate::utils::error::Result;
use chrono::{DateTime, SecondsFormat, Utc, Weekday};
use serde::Serialize;
use serde_json::Value;

/// Writes the snapshot consumed by the menu page, plus its metadata sidecar.
pub struct SnapshotWriter<S: Storage> {
    storage: S,
    file_name: String,
    format: SnapshotFormat,
}

impl<S: Storage> SnapshotWriter<S> {
    pub fn new(storage: S, file_name: impl Into<String>, format: SnapshotFormat) -> Self {
        Self {
            storage,
            file_name: file_name.into(),
            format,
        }
    }

    /// `menus.json` -> `menus.meta.json`
    pub fn meta_file_name(&self) -> String {
        match self.file_name.strip_suffix(".json") {
            Some(stem) => format!("{}.meta.json", stem),
            None => format!("{}.meta.json", self.file_name),
        }
    }

    /// Replaces the snapshot unless its restaurant list is unchanged, in which
    /// case storage is left untouched.
    pub async fn write(
        &self,
        menus: &[MenuResult],
        today: Weekday,
        now: DateTime<Utc>,
    ) -> Result<WriteOutcome> {
        let next_list = match self.format {
            SnapshotFormat::Menus => serde_json::to_value(menus)?,
            SnapshotFormat::Legacy => {
                let sources: Vec<LegacySource> = menus.iter().map(LegacySource::from).collect();
                serde_json::to_value(sources)?
            }
        };
        let previous_list = self.previous_list().await;

        if serde_json::to_string(&previous_list)? == serde_json::to_string(&next_list)? {
            tracing::info!("💤 Snapshot unchanged, {} not rewritten", self.file_name);
            return Ok(WriteOutcome::Unchanged {
                path: self.file_name.clone(),
            });
        }

        let generated_at = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        let payload = match self.format {
            SnapshotFormat::Menus => to_pretty_json(&Snapshot {
                generated_at: generated_at.clone(),
                weekday: weekday_index(today),
                menus: menus.to_vec(),
            })?,
            SnapshotFormat::Legacy => to_pretty_json(&LegacySnapshot {
                generated_at: generated_at.clone(),
                sources: menus.iter().map(LegacySource::from).collect(),
            })?,
        };
        let meta = to_pretty_json(&SnapshotMeta {
            generated_at: generated_at.clone(),
            source_count: menus.len(),
        })?;

        self.storage.write_file(&self.file_name, payload.as_bytes()).await?;
        self.storage.write_file(&self.meta_file_name(), meta.as_bytes()).await?;

        tracing::info!("💾 Snapshot written to {} ({} sources)", self.file_name, menus.len());
        Ok(WriteOutcome::Written {
            path: self.file_name.clone(),
            generated_at,
        })
    }

    /// The list stored by the previous run. A missing or unreadable file
    /// counts as an empty list.
    async fn previous_list(&self) -> Value {
        let empty = Value::Array(Vec::new());
        let Ok(bytes) = self.storage.read_file(&self.file_name).await else {
            return empty;
        };

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(mut payload) => payload
                .get_mut(self.format.list_key())
                .map(Value::take)
                .unwrap_or(empty),
            Err(e) => {
                tracing::warn!("⚠️ Previous snapshot is not valid JSON: {}", e);
                empty
            }
        }
    }
}

fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}
