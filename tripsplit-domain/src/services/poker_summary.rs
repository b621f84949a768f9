use crate::model::{Balance, Money, ParticipantId, PokerGame};
use indexmap::IndexMap;

/// One attendee's totals across every poker game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PokerStanding {
    pub participant: ParticipantId,
    pub buy_in: Money,
    pub cash_out: Money,
}

impl PokerStanding {
    /// Creditor-positive: winnings are owed to the player.
    pub fn net(&self) -> Money {
        self.cash_out - self.buy_in
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PokerSummary {
    standings: IndexMap<ParticipantId, PokerStanding>,
}

impl PokerSummary {
    /// Sums buy-ins and cash-outs per attendee over all games, active ones
    /// included, in first-seen order.
    pub fn from_games(games: &[PokerGame]) -> Self {
        let mut standings: IndexMap<ParticipantId, PokerStanding> = IndexMap::new();
        for player in games.iter().flat_map(|game| &game.players) {
            let standing = standings
                .entry(player.attendee.clone())
                .or_insert_with(|| PokerStanding {
                    participant: player.attendee.clone(),
                    buy_in: Money::ZERO,
                    cash_out: Money::ZERO,
                });
            standing.buy_in += player.buy_in;
            standing.cash_out += player.cash_out;
        }

        tracing::debug!(
            game_count = games.len(),
            player_count = standings.len(),
            "Poker summary aggregated"
        );

        Self { standings }
    }

    pub fn standings(&self) -> impl Iterator<Item = &PokerStanding> + '_ {
        self.standings.values()
    }

    pub fn is_empty(&self) -> bool {
        self.standings.is_empty()
    }

    pub fn balances(&self) -> Vec<Balance> {
        self.standings
            .values()
            .map(|standing| Balance {
                participant: standing.participant.clone(),
                net: standing.net(),
            })
            .collect()
    }
}
