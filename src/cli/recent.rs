use std::path::Path;

use colored::Colorize;

use crate::error::Result;

pub fn run() -> Result<()> {
    let stored = crate::recent::load();
    if stored.is_empty() {
        println!("최근에 연 명세서가 없습니다.");
        return Ok(());
    }
    for (i, p) in stored.iter().enumerate() {
        if Path::new(p).exists() {
            println!("{:>2}. {p}", i + 1);
        } else {
            println!("{:>2}. {p} {}", i + 1, "(없음)".dimmed());
        }
    }
    Ok(())
}
