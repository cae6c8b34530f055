use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;
use dashmap::DashMap;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::{fs, sync::Mutex};
use uuid::Uuid;

use crate::utils::time::{iso_week_info, IsoWeekInfo};

use super::{Record, StorageError, WeekMeta, WeeklyLog};

/// Append-only measurement log, one JSON file per ISO week.
///
/// Files are rewritten through a temp file plus rename, so readers never see a
/// half-written file. Writers to the same file are serialized in-process.
#[derive(Clone)]
pub struct WeeklyLogStore {
    dir: PathBuf,
    tz: Tz,
    locks: Arc<DashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl WeeklyLogStore {
    pub fn new(dir: impl Into<PathBuf>, tz: Tz) -> Self {
        Self {
            dir: dir.into(),
            tz,
            locks: Arc::new(DashMap::new()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn path_for<T: TimeZone>(&self, at: &DateTime<T>) -> PathBuf {
        self.path_for_week(&self.week_of(at))
    }

    fn path_for_week(&self, week: &IsoWeekInfo) -> PathBuf {
        self.dir.join(format!("{}.json", week.file_stem()))
    }

    fn week_of<T: TimeZone>(&self, at: &DateTime<T>) -> IsoWeekInfo {
        iso_week_info(&at.with_timezone(&self.tz))
    }

    fn lock_for(&self, path: &Path) -> Arc<Mutex<()>> {
        self.locks
            .entry(path.to_path_buf())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    pub async fn append<T: TimeZone>(&self, record: Record, at: &DateTime<T>) -> Result<(), StorageError> {
        if !record.has_finite_values() {
            return Err(StorageError::InvalidRecord(format!(
                "non-finite measurement (height {}, weight {}, bmi {})",
                record.height, record.weight, record.bmi
            )));
        }

        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StorageError::io(&self.dir, e))?;

        let week = self.week_of(at);
        let path = self.path_for_week(&week);

        let lock = self.lock_for(&path);
        let _guard = lock.lock().await;

        let mut log = match self.read_file(&path).await? {
            Some(log) => log,
            None => {
                info!("Creating weekly log {}", path.display());
                WeeklyLog::new(WeekMeta::new(&week, self.tz.name()))
            }
        };

        log.items.push(record);

        self.write_atomic(&path, &log).await?;

        debug!("Appended record to {} ({} items)", path.display(), log.items.len());

        Ok(())
    }

    pub async fn read_week<T: TimeZone>(&self, at: &DateTime<T>) -> Result<Option<WeeklyLog>, StorageError> {
        self.read_file(&self.path_for(at)).await
    }

    /// Records of `chat_id` whose `created_at` falls on the local date of `at`.
    pub async fn count_for_chat_today<T: TimeZone>(&self, chat_id: i64, at: &DateTime<T>) -> Result<usize, StorageError> {
        let today = at.with_timezone(&self.tz).date_naive();

        let Some(log) = self.read_week(at).await? else {
            return Ok(0);
        };

        let count = log
            .items
            .iter()
            .filter(|record| record.chat_id == chat_id)
            .filter(|record| record.created_at.with_timezone(&self.tz).date_naive() == today)
            .count();

        Ok(count)
    }

    async fn read_file(&self, path: &Path) -> Result<Option<WeeklyLog>, StorageError> {
        let bytes = match fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::io(path, e)),
        };

        let log = serde_json::from_slice(&bytes).map_err(|e| StorageError::serde(path, e))?;

        Ok(Some(log))
    }

    async fn write_atomic(&self, path: &Path, log: &WeeklyLog) -> Result<(), StorageError> {
        let json = serde_json::to_vec_pretty(log).map_err(|e| StorageError::serde(path, e))?;

        let file_name = path.file_name().and_then(|name| name.to_str()).unwrap_or("week.json");
        let temp_path = self.dir.join(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));

        if let Err(e) = fs::write(&temp_path, &json).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StorageError::io(&temp_path, e));
        }

        if let Err(e) = fs::rename(&temp_path, path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StorageError::io(path, e));
        }

        Ok(())
    }
}
