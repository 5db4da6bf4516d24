use std::io::Write;
use std::time::Duration;

use gita::AppState;
use gita::maintenance;
use gita_core::GitaConfig;

pub async fn populate(
    config: &GitaConfig,
    chapter: Option<u32>,
    delay_secs: Option<u64>,
) -> anyhow::Result<()> {
    let delay = Duration::from_secs(delay_secs.unwrap_or(config.maintenance.populate_delay_secs));
    let state = AppState::load(config).await?;

    match chapter {
        Some(chapter) => println!("Populating chapter {chapter}..."),
        None => println!("Populating all chapters..."),
    }
    let report = maintenance::populate(&state.store, &state.gemini, delay, chapter).await?;

    println!(
        "Inserted {}, updated {}, already stored {}, failed {}.",
        report.inserted, report.updated, report.skipped, report.failed
    );
    Ok(())
}

pub async fn enhance(config: &GitaConfig, delay_secs: Option<u64>) -> anyhow::Result<()> {
    let delay = Duration::from_secs(delay_secs.unwrap_or(config.maintenance.enhance_delay_secs));
    let state = AppState::load(config).await?;

    let report = maintenance::enhance(&state.store, &state.gemini, delay).await?;

    if report.enhanced + report.skipped + report.failed == 0 {
        println!("No verses need enhancement.");
    } else {
        println!(
            "Enhanced {}, skipped {} (missing original text), failed {}.",
            report.enhanced, report.skipped, report.failed
        );
    }
    Ok(())
}

pub async fn cleanup(config: &GitaConfig, skip_confirm: bool) -> anyhow::Result<()> {
    if !skip_confirm {
        println!(
            "This will rewrite stored text in {}. Make a backup first.",
            config.database.path.display()
        );
        print!("Type 'yes' to continue: ");
        std::io::stdout().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("yes") {
            println!("Cleanup cancelled.");
            return Ok(());
        }
    }

    let state = AppState::load(config).await?;
    let report = maintenance::cleanup(&state.store).await?;

    println!(
        "Cleaned {} of {} verses ({} failed).",
        report.cleaned, report.checked, report.failed
    );
    Ok(())
}
