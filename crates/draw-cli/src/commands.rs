//! Command handlers

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Subcommand};
use draw_core::{DrawConfig, Participant, PrizeType, StorageEffects};
use draw_effects::{FilesystemStorageHandler, RealRandomHandler};
use draw_session::{
    load_roster, parse_roster, DrawService, ExportResponse, RecordAbsentRequest,
    RecordGateway, RecordWinnersRequest, RosterRow, SessionStore, StatusResponse,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Roster import arguments
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// JSON file holding an array of rows: `[id, name, ...]`
    pub path: PathBuf,
}

/// Operations on an opened session
#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Print catalog, eligible pool and winner ledger
    State,

    /// Print the shuffled roster
    Roster,

    /// Record the winners of one round
    Win {
        /// Prize type of the round
        #[arg(short, long, allow_negative_numbers = true)]
        prize: i64,

        /// Roster ids of the winners
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Mark participants absent
    Absent {
        /// Roster ids of the absent participants
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Clear winners and absentees
    Reset,

    /// Write the results matrix record
    Export,
}

fn storage_for(config: &DrawConfig) -> Arc<dyn StorageEffects> {
    Arc::new(FilesystemStorageHandler::new(config.session.data_dir.clone()))
}

/// Validate a roster file and store its rows as the roster record
pub async fn import_roster(config: &DrawConfig, args: &ImportArgs) -> Result<()> {
    let content = std::fs::read_to_string(&args.path)
        .with_context(|| format!("reading roster file {}", args.path.display()))?;
    let rows: Vec<RosterRow> = serde_json::from_str(&content)
        .with_context(|| format!("roster file {} is not a JSON array of rows", args.path.display()))?;
    let roster = parse_roster(&rows)?;

    let gateway = RecordGateway::new(storage_for(config), config.session.persist_timeout());
    let name = &config.session.records.roster;
    gateway.save(name, &rows).await?;

    tracing::info!(participants = roster.len(), "roster imported");
    println!("{}", gateway.locate(name));
    Ok(())
}

/// Open the session over the configured record directory
pub async fn open_session(config: &DrawConfig) -> Result<DrawService> {
    config.validate()?;
    let store = SessionStore::from_config(
        config,
        storage_for(config),
        Arc::new(RealRandomHandler::new()),
    );

    let roster = load_roster(store.gateway(), &config.session.records.roster)
        .await
        .context("loading roster (run `draw import <file>` first)")?;
    store.initialize(roster).await?;
    store.resume().await.context("resuming persisted records")?;

    Ok(DrawService::new(Arc::new(store), config))
}

/// Run one operation against an opened session
pub async fn handle_session_command(service: &DrawService, cmd: SessionCommand) -> Result<()> {
    match cmd {
        SessionCommand::State => print_json(&service.get_state()?),
        SessionCommand::Roster => print_json(&service.get_roster()?),
        SessionCommand::Win { prize, ids } => {
            let data = resolve(&service.get_roster()?, &ids)?;
            let response = service
                .record_winners(RecordWinnersRequest {
                    prize_type: PrizeType::new(prize),
                    data: data.into(),
                })
                .await;
            finish(&response)
        }
        SessionCommand::Absent { ids } => {
            let data = resolve(&service.get_roster()?, &ids)?;
            let response = service
                .record_absent(RecordAbsentRequest { data: data.into() })
                .await;
            finish(&response)
        }
        SessionCommand::Reset => finish(&service.reset_session().await),
        SessionCommand::Export => {
            let response = service.export_results().await;
            print_json(&response)?;
            match response {
                ExportResponse::Success { .. } => Ok(()),
                ExportResponse::Error { detail } => bail!("export failed: {detail}"),
            }
        }
    }
}

/// Look up roster entries by id, in argument order
fn resolve(roster: &[Participant], ids: &[String]) -> Result<Vec<Participant>> {
    ids.iter()
        .map(|id| {
            roster
                .iter()
                .find(|p| p.id.as_str() == id)
                .cloned()
                .ok_or_else(|| anyhow!("participant {id} is not on the roster"))
        })
        .collect()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn finish(response: &StatusResponse) -> Result<()> {
    print_json(response)?;
    if !response.is_success() {
        bail!(
            "operation failed: {}",
            response.detail.as_deref().unwrap_or("no detail")
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> DrawConfig {
        let mut config = DrawConfig::default();
        config.session.data_dir = dir.path().to_path_buf();
        config
    }

    fn write_roster(dir: &TempDir, count: usize) -> PathBuf {
        let rows: Vec<Vec<String>> = (1..=count)
            .map(|i| vec![i.to_string(), format!("P{i}"), "Sales".to_string()])
            .collect();
        let path = dir.path().join("people.json");
        std::fs::write(&path, serde_json::to_vec(&rows).unwrap()).unwrap();
        path
    }

    #[test]
    fn resolve_keeps_argument_order() {
        let roster = vec![Participant::new("1", "Ann"), Participant::new("2", "Bo")];
        let picked = resolve(&roster, &["2".to_string(), "1".to_string()]).unwrap();
        assert_eq!(picked, vec![roster[1].clone(), roster[0].clone()]);
    }

    #[test]
    fn resolve_rejects_unknown_id() {
        let roster = vec![Participant::new("1", "Ann")];
        let err = resolve(&roster, &["7".to_string()]).unwrap_err();
        assert!(err.to_string().contains("not on the roster"));
    }

    #[tokio::test]
    async fn open_without_roster_fails() {
        let dir = TempDir::new().unwrap();
        assert!(open_session(&config_in(&dir)).await.is_err());
    }

    #[tokio::test]
    async fn mutations_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        let path = write_roster(&dir, 5);
        import_roster(&config, &ImportArgs { path }).await.unwrap();

        let service = open_session(&config).await.unwrap();
        handle_session_command(
            &service,
            SessionCommand::Win {
                prize: 2,
                ids: vec!["4".to_string()],
            },
        )
        .await
        .unwrap();
        handle_session_command(
            &service,
            SessionCommand::Absent {
                ids: vec!["1".to_string()],
            },
        )
        .await
        .unwrap();

        let reopened = open_session(&config).await.unwrap();
        let state = reopened.get_state().unwrap();
        assert_eq!(state.eligible_pool.len(), 3);
        assert_eq!(
            state.winner_ledger.winners(PrizeType::new(2)),
            [Participant::new("4", "P4")]
        );

        handle_session_command(&reopened, SessionCommand::Export)
            .await
            .unwrap();
        assert!(dir.path().join("results.json").exists());
    }

    #[tokio::test]
    async fn unknown_prize_is_an_error() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        import_roster(&config, &ImportArgs { path: write_roster(&dir, 2) })
            .await
            .unwrap();
        let service = open_session(&config).await.unwrap();

        let result = handle_session_command(
            &service,
            SessionCommand::Win {
                prize: 99,
                ids: vec!["1".to_string()],
            },
        )
        .await;
        assert!(result.is_err());
    }
}
