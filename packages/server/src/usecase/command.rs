//! Request parsing.
//!
//! A request line is split into a keyword and its arguments, then matched
//! against the command set of the session's current mode. Keywords are
//! case-sensitive. `ENTER CHAT` and `EXIT CHAT` are two-word commands.

use std::str::SplitWhitespace;

use crate::domain::{FlightId, SessionMode, Username};

use super::error::ParseError;

/// Commands accepted in desk mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeskCommand {
    Logon(Username),
    Logoff,
    EnterChat,
    Query(FlightId),
    List(Option<usize>),
    ListAvailable(Option<usize>),
    Reserve { flight: FlightId, seats: u32 },
    Return { flight: FlightId, seats: u32 },
    Exit,
}

/// Commands accepted in chat mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Text(String),
    ListChat,
    ListAll,
    ListOffline,
    ExitChat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Desk(DeskCommand),
    Chat(ChatCommand),
}

impl Request {
    pub fn parse(line: &str, mode: SessionMode) -> Result<Self, ParseError> {
        let line = line.trim();
        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim_start()),
            None => (line, ""),
        };
        if keyword.is_empty() {
            return Err(ParseError::Empty);
        }

        match mode {
            SessionMode::Desk => DeskCommand::parse(keyword, rest).map(Request::Desk),
            SessionMode::Chat => ChatCommand::parse(keyword, rest).map(Request::Chat),
        }
    }
}

impl DeskCommand {
    fn parse(keyword: &str, rest: &str) -> Result<Self, ParseError> {
        let mut args = Args::new(rest);
        let command = match keyword {
            "LOGON" => {
                let name = args.required("username")?;
                let name = Username::try_from(name)
                    .map_err(|_| ParseError::InvalidArgument("username", name.to_string()))?;
                Self::Logon(name)
            }
            "LOGOFF" => Self::Logoff,
            "ENTER" if args.keyword("CHAT") => Self::EnterChat,
            "QUERY" => Self::Query(args.flight()?),
            "LIST" => Self::List(args.limit()?),
            "LIST_AVAILABLE" | "L_A" => Self::ListAvailable(args.limit()?),
            "RESERVE" => Self::Reserve {
                flight: args.flight()?,
                seats: args.seats()?,
            },
            "RETURN" => Self::Return {
                flight: args.flight()?,
                seats: args.seats()?,
            },
            "EXIT" if rest.is_empty() => Self::Exit,
            _ => return Err(unrecognized(keyword, rest)),
        };
        Ok(command)
    }
}

impl ChatCommand {
    fn parse(keyword: &str, rest: &str) -> Result<Self, ParseError> {
        let mut args = Args::new(rest);
        let command = match keyword {
            "TEXT" if rest.is_empty() => return Err(ParseError::MissingArgument("message")),
            "TEXT" => Self::Text(rest.to_string()),
            "LIST" => Self::ListChat,
            "LIST_ALL" => Self::ListAll,
            "LIST_OFFLINE" => Self::ListOffline,
            "EXIT" if args.keyword("CHAT") => Self::ExitChat,
            _ => return Err(unrecognized(keyword, rest)),
        };
        Ok(command)
    }
}

fn unrecognized(keyword: &str, rest: &str) -> ParseError {
    // two-word commands report both words
    match (keyword, rest.split_whitespace().next()) {
        ("ENTER" | "EXIT", Some(second)) => {
            ParseError::Unrecognized(format!("{} {}", keyword, second))
        }
        _ => ParseError::Unrecognized(keyword.to_string()),
    }
}

struct Args<'a> {
    tokens: SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    fn new(rest: &'a str) -> Self {
        Self {
            tokens: rest.split_whitespace(),
        }
    }

    fn required(&mut self, name: &'static str) -> Result<&'a str, ParseError> {
        self.tokens.next().ok_or(ParseError::MissingArgument(name))
    }

    fn keyword(&mut self, expected: &str) -> bool {
        self.tokens.next() == Some(expected)
    }

    fn flight(&mut self) -> Result<FlightId, ParseError> {
        let flight = self.required("flight")?;
        FlightId::try_from(flight)
            .map_err(|_| ParseError::InvalidArgument("flight", flight.to_string()))
    }

    fn seats(&mut self) -> Result<u32, ParseError> {
        let seats = self.required("seats")?;
        seats
            .parse()
            .map_err(|_| ParseError::InvalidArgument("seats", seats.to_string()))
    }

    fn limit(&mut self) -> Result<Option<usize>, ParseError> {
        self.tokens
            .next()
            .map(|limit| {
                limit
                    .parse()
                    .map_err(|_| ParseError::InvalidArgument("limit", limit.to_string()))
            })
            .transpose()
    }
}
