use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use pokeworld_core::{Coordinate, ItemKind};

/// One line of a play script.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    Creature(u32),
    Trainer(u32),
    Throw(ItemKind),
    Flee,
    Attack,
    Buy(ItemKind),
    Recenter,
    Wait(u64),
    Move(Coordinate),
    Refresh,
    Show,
}

impl Intent {
    /// Blank lines and `#` comments yield `None`.
    pub fn parse_line(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        line.parse().map(Some)
    }
}

impl FromStr for Intent {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut words = s.split_whitespace();
        let verb = words.next().ok_or_else(|| anyhow!("empty intent"))?;
        let args: Vec<&str> = words.collect();
        let intent = match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("creature", [id]) => Intent::Creature(parse_number(id)?),
            ("trainer", [id]) => Intent::Trainer(parse_number(id)?),
            ("throw", [item]) => Intent::Throw(item.parse()?),
            ("flee", []) => Intent::Flee,
            ("attack", []) => Intent::Attack,
            ("buy", [item]) => Intent::Buy(item.parse()?),
            ("recenter", []) => Intent::Recenter,
            ("wait", [ms]) => Intent::Wait(parse_number(ms)?),
            ("move", [lat, lng]) => Intent::Move(Coordinate::new(parse_number(lat)?, parse_number(lng)?)),
            ("refresh", []) => Intent::Refresh,
            ("show", []) => Intent::Show,
            (verb, args) => bail!("unknown intent `{verb}` with {} argument(s)", args.len()),
        };
        Ok(intent)
    }
}

fn parse_number<T>(raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse()
        .with_context(|| format!("`{raw}` is not a valid number"))
}
