//! Line-oriented scanner for card blocks in an HTML template.
//!
//! A card block looks like:
//!
//! ```text
//! <!-- 3 -->
//! {{ card(
//!   title=_('Firefox Browser'),
//!   image_url='img/home/2018/cards/firefox.png',
//!   ...
//! )}}
//! ```
//!
//! The id marker arms a pending card, the open token starts collecting
//! `key=value` arguments and the close token emits the card. Blocks that
//! never close are dropped.

use std::sync::LazyLock;

use regex::Regex;

use super::card::RawCard;
use super::normalize::normalize_value;

/// Line that opens the argument list of a card block.
pub const CARD_START: &str = "{{ card(";
/// Line that closes the argument list of a card block.
pub const CARD_END: &str = ")}}";

static CARD_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!-- (\d{1,2}) -->").expect("valid card id pattern"));

static ARG_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)=(.+)$").expect("valid argument pattern"));

#[derive(Debug)]
enum State {
    Idle,
    /// An id marker was seen; waiting for the open token
    AwaitingOpen(RawCard),
    /// Collecting arguments
    InBlock(RawCard),
}

/// Iterator over the well-formed card blocks of a template, in source order.
pub struct CardBlocks<I> {
    lines: I,
    state: State,
}

impl<I> CardBlocks<I> {
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            state: State::Idle,
        }
    }
}

impl<I, S> Iterator for CardBlocks<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = RawCard;

    fn next(&mut self) -> Option<RawCard> {
        for line in self.lines.by_ref() {
            let line = line.as_ref().trim();

            // A new marker always restarts; an unclosed block before it is discarded.
            if let Some(caps) = CARD_ID.captures(line) {
                self.state = State::AwaitingOpen(RawCard::new(&caps[1]));
                continue;
            }

            self.state = match std::mem::replace(&mut self.state, State::Idle) {
                State::Idle => State::Idle,
                State::AwaitingOpen(card) if line == CARD_START => State::InBlock(card),
                State::AwaitingOpen(card) => State::AwaitingOpen(card),
                State::InBlock(card) if line == CARD_END => return Some(card),
                State::InBlock(mut card) => {
                    if let Some(caps) = ARG_LINE.captures(line) {
                        card.fields
                            .insert(caps[1].to_string(), normalize_value(&caps[2]).to_string());
                    }
                    State::InBlock(card)
                }
            };
        }

        None
    }
}
