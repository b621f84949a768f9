//! JSON dump of a trip's records, used as a read-only repository.
//!
//! Keys are camelCase and amounts are plain JSON numbers in dollars. Only
//! `attendees` is required; missing collections are empty.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tripsplit_application::{RepositoryError, TripRepository};
use tripsplit_domain::{
    Attendee, Expense, GameStatus, InvalidAmount, Money, ParticipantId, PokerGame, PokerPlayer,
    SettlementStatus, TransferKey,
};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("cannot read snapshot {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid amount at {field}: {source}")]
    InvalidAmount {
        field: String,
        source: InvalidAmount,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotDto {
    attendees: Vec<AttendeeDto>,
    #[serde(default)]
    expenses: Vec<ExpenseDto>,
    #[serde(default)]
    poker_games: Vec<PokerGameDto>,
    #[serde(default)]
    settlement_statuses: Vec<SettlementStatusDto>,
}

#[derive(Debug, Deserialize)]
struct AttendeeDto {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpenseDto {
    id: String,
    #[serde(default)]
    description: String,
    amount: f64,
    payer_id: String,
    #[serde(default)]
    beneficiary_ids: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum GameStatusDto {
    #[default]
    Active,
    Finished,
}

#[derive(Debug, Deserialize)]
struct PokerGameDto {
    id: String,
    #[serde(default)]
    status: GameStatusDto,
    #[serde(default)]
    players: Vec<PokerPlayerDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PokerPlayerDto {
    attendee_id: String,
    #[serde(default)]
    buy_in: f64,
    #[serde(default)]
    cash_out: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettlementStatusDto {
    from_attendee_id: String,
    to_attendee_id: String,
    #[serde(default)]
    paid: bool,
    #[serde(default)]
    amount: Option<f64>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

/// Every amount in a snapshot is a non-negative dollar value.
fn money(field: impl FnOnce() -> String, value: f64) -> Result<Money, SnapshotError> {
    let parsed = if value < 0.0 {
        Err(InvalidAmount::Negative(value))
    } else {
        Money::try_from_f64(value)
    };
    parsed.map_err(|source| SnapshotError::InvalidAmount {
        field: field(),
        source,
    })
}

/// Trip records loaded from a JSON snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonTripSnapshot {
    attendees: Vec<Attendee>,
    expenses: Vec<Expense>,
    poker_games: Vec<PokerGame>,
    statuses: Vec<SettlementStatus>,
}

impl JsonTripSnapshot {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::from_json(&content)?;
        tracing::info!(path = %path.display(), "Snapshot loaded");
        Ok(snapshot)
    }

    /// Parses a snapshot; statuses without `updatedAt` are stamped `loaded_at`.
    pub fn from_json(content: &str) -> Result<Self, SnapshotError> {
        Self::from_json_at(content, Utc::now())
    }

    pub fn from_json_at(content: &str, loaded_at: DateTime<Utc>) -> Result<Self, SnapshotError> {
        let dto: SnapshotDto = serde_json::from_str(content).inspect_err(|err| {
            tracing::error!(error = %err, "Snapshot rejected");
        })?;

        let attendees = dto
            .attendees
            .into_iter()
            .map(|attendee| Attendee {
                id: attendee.id.into(),
                name: attendee.name,
            })
            .collect::<Vec<_>>();

        let expenses = dto
            .expenses
            .into_iter()
            .map(|expense| {
                let amount = money(|| format!("expenses[{}].amount", expense.id), expense.amount)?;
                Ok(Expense::new(
                    expense.id,
                    expense.description,
                    amount,
                    expense.payer_id.into(),
                    expense.beneficiary_ids.into_iter().map(ParticipantId::from),
                ))
            })
            .collect::<Result<Vec<_>, SnapshotError>>()?;

        let poker_games = dto
            .poker_games
            .into_iter()
            .map(|game| {
                let players = game
                    .players
                    .into_iter()
                    .map(|player| {
                        let field = |name: &str| {
                            format!("pokerGames[{}].{}.{name}", game.id, player.attendee_id)
                        };
                        Ok(PokerPlayer {
                            buy_in: money(|| field("buyIn"), player.buy_in)?,
                            cash_out: money(|| field("cashOut"), player.cash_out)?,
                            attendee: player.attendee_id.into(),
                        })
                    })
                    .collect::<Result<Vec<_>, SnapshotError>>()?;
                Ok(PokerGame {
                    id: game.id,
                    status: match game.status {
                        GameStatusDto::Active => GameStatus::Active,
                        GameStatusDto::Finished => GameStatus::Finished,
                    },
                    players,
                })
            })
            .collect::<Result<Vec<_>, SnapshotError>>()?;

        let statuses = dto
            .settlement_statuses
            .into_iter()
            .map(|status| {
                let key = TransferKey::new(status.from_attendee_id, status.to_attendee_id);
                let recorded_amount = status
                    .amount
                    .map(|amount| money(|| format!("settlementStatuses[{key}].amount"), amount))
                    .transpose()?;
                Ok(SettlementStatus {
                    key,
                    paid: status.paid,
                    recorded_amount,
                    updated_at: status.updated_at.unwrap_or(loaded_at),
                })
            })
            .collect::<Result<Vec<_>, SnapshotError>>()?;

        tracing::debug!(
            attendee_count = attendees.len(),
            expense_count = expenses.len(),
            poker_game_count = poker_games.len(),
            status_count = statuses.len(),
            "Snapshot parsed"
        );

        Ok(Self {
            attendees,
            expenses,
            poker_games,
            statuses,
        })
    }

    pub fn roster(&self) -> &[Attendee] {
        &self.attendees
    }

    pub fn settlement_statuses(&self) -> &[SettlementStatus] {
        &self.statuses
    }
}

impl TripRepository for JsonTripSnapshot {
    fn attendees(&self) -> Result<Vec<Attendee>, RepositoryError> {
        Ok(self.attendees.clone())
    }

    fn expenses(&self) -> Result<Vec<Expense>, RepositoryError> {
        Ok(self.expenses.clone())
    }

    fn poker_games(&self) -> Result<Vec<PokerGame>, RepositoryError> {
        Ok(self.poker_games.clone())
    }
}
