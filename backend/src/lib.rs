pub mod buckwalter;
pub mod logger;
pub mod types;

pub mod db;

use std::env;
use std::error::Error;
use std::fs::create_dir_all;
use std::path::PathBuf;

use app_dirs::{get_app_root, AppDataType, AppInfo};

pub const APP_INFO: AppInfo = AppInfo { name: "quran-db", author: "quran-db" };

pub static QURAN_DB_FILENAME: &'static str = "quran.sqlite3";

/// Returns the application data directory, creating it if necessary.
/// The QURAN_DIR env var overrides the platform default.
pub fn get_create_quran_dir() -> Result<PathBuf, Box<dyn Error>> {
    let p = match env::var("QURAN_DIR") {
        Ok(s) if !s.is_empty() => PathBuf::from(s),
        _ => get_app_root(AppDataType::UserData, &APP_INFO)?,
    };
    if !p.exists() {
        create_dir_all(&p)?;
    }
    Ok(p)
}

pub fn get_create_quran_assets_path() -> PathBuf {
    let p = get_create_quran_dir().unwrap_or(PathBuf::from(".")).join("db-assets/");
    if !p.exists() {
        let _ = create_dir_all(&p);
    }
    p
}

pub fn get_quran_db_path() -> PathBuf {
    get_create_quran_assets_path().join(QURAN_DB_FILENAME)
}

pub fn quran_db_exists() -> bool {
    get_quran_db_path().exists()
}
