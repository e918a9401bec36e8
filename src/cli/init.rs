use dialoguer::Confirm;

use crate::categorize::CategoryRules;
use crate::error::{AppError, Result};
use crate::settings::{
    categories_path, config_dir, data_dir, save_settings, settings_path, Settings,
};

pub fn run() -> Result<()> {
    std::fs::create_dir_all(config_dir())?;
    std::fs::create_dir_all(data_dir())?;

    if write_settings()? {
        println!("설정 저장: {}", settings_path().display());
    }
    if write_categories()? {
        println!("카테고리 규칙 저장: {}", categories_path().display());
    }

    let settings = crate::settings::load_settings();
    std::fs::create_dir_all(&settings.export_dir)?;
    println!("내보내기 폴더: {}", settings.export_dir);
    tracing::info!("initialized config at {}", config_dir().display());
    Ok(())
}

fn write_settings() -> Result<bool> {
    let path = settings_path();
    if path.exists() {
        let overwrite = Confirm::new()
            .with_prompt("settings.json이 이미 있습니다. 기본값으로 덮어쓸까요?")
            .default(false)
            .interact()
            .map_err(|e| AppError::Other(e.to_string()))?;
        if !overwrite {
            println!("기존 설정 유지: {}", path.display());
            return Ok(false);
        }
    }
    save_settings(&Settings::default())?;
    Ok(true)
}

fn write_categories() -> Result<bool> {
    let path = categories_path();
    if path.exists() {
        println!("기존 카테고리 규칙 유지: {}", path.display());
        return Ok(false);
    }
    let rules = CategoryRules::defaults();
    let json = serde_json::to_string_pretty(rules.rules())
        .map_err(|e| AppError::Config(e.to_string()))?;
    std::fs::write(&path, format!("{json}\n"))?;
    Ok(true)
}
