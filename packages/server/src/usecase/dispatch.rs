//! UseCase: one request line against the desk
//!
//! Parsing, the authorization check and the command itself run inside a
//! single desk-lock scope. The returned [`Outcome`] tells the listener what to
//! write back and whether its loop continues.

use std::sync::Arc;

use crate::domain::{Desk, DeskState, SessionError, format_listing};

use super::{
    command::{ChatCommand, DeskCommand, Request},
    error::ParseError,
    reply::{self, ReservationCode},
};

/// What the listener should do with a dispatched request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Write the reply and close the connection
    Reply(String),
    /// Write the farewell and stop the listener loop
    Terminate(String),
    /// Fan the chat line out to the chat room, then echo it to the sender
    Broadcast(String),
    /// Close the connection without a reply
    Silent,
}

/// Command dispatch for the session bound to a listener port
pub struct DispatchUseCase {
    desk: Arc<Desk>,
}

impl DispatchUseCase {
    pub fn new(desk: Arc<Desk>) -> Self {
        Self { desk }
    }

    /// Parse and execute one request line for session `index`
    pub fn execute(&self, index: usize, line: &str) -> Outcome {
        let mut state = self.desk.lock();

        let mode = match state.sessions.session(index) {
            Ok(session) => session.mode(),
            Err(e) => return Outcome::Reply(e.to_string()),
        };

        let request = match Request::parse(line, mode) {
            Ok(request) => request,
            Err(ParseError::Empty) => return Outcome::Silent,
            Err(e) => {
                tracing::debug!("Session {} sent unparsable request: {}", index, e);
                return Outcome::Reply(e.to_string());
            }
        };
        tracing::debug!("Session {} dispatching {:?}", index, request);

        let result = match request {
            Request::Desk(command) => execute_desk(&mut state, index, command),
            Request::Chat(command) => execute_chat(&mut state, index, command),
        };
        result.unwrap_or_else(|e| Outcome::Reply(e.to_string()))
    }
}

fn require_logon(state: &DeskState, index: usize) -> Result<(), SessionError> {
    if state.sessions.session(index)?.is_logged_on() {
        Ok(())
    } else {
        Err(SessionError::Unauthorized)
    }
}

fn execute_desk(
    state: &mut DeskState,
    index: usize,
    command: DeskCommand,
) -> Result<Outcome, SessionError> {
    match &command {
        DeskCommand::Logon(_) | DeskCommand::Logoff | DeskCommand::Exit => {}
        _ => require_logon(state, index)?,
    }

    let outcome = match command {
        DeskCommand::Logon(requested) => {
            let assigned = state.sessions.logon(index, requested)?;
            tracing::info!("Session {} logged on as {}", index, assigned);
            Outcome::Reply(reply::logged_on(assigned.as_str()))
        }
        DeskCommand::Logoff => {
            let previous = state.sessions.logoff(index)?;
            tracing::info!("Session {} logged off", index);
            Outcome::Terminate(reply::logged_off(previous.as_ref().map(|name| name.as_str())))
        }
        DeskCommand::Exit => Outcome::Terminate(reply::GOODBYE.to_string()),
        DeskCommand::EnterChat => {
            state.sessions.enter_chat(index)?;
            let session = state.sessions.session(index)?;
            let name = session.username().map(|name| name.as_str()).unwrap_or_default();
            Outcome::Reply(reply::entered_chat(name))
        }
        DeskCommand::Query(flight) => match state.inventory.get(&flight) {
            Ok(seats) => Outcome::Reply(seats.to_string()),
            Err(_) => Outcome::Reply(reply::ERROR_OCCURRED.to_string()),
        },
        DeskCommand::List(limit) => Outcome::Reply(format_listing(state.inventory.entries(limit))),
        DeskCommand::ListAvailable(limit) => {
            Outcome::Reply(format_listing(state.inventory.available(limit)))
        }
        DeskCommand::Reserve { flight, seats } => {
            let result = state.inventory.reserve(&flight, seats);
            let code = ReservationCode::of(&result);
            tracing::debug!("RESERVE {} {} on session {}: {:?}", flight, seats, index, code);
            Outcome::Reply(match code {
                ReservationCode::Success => reply::reserved(seats, flight.as_str()),
                ReservationCode::Failed => reply::ERROR_OCCURRED.to_string(),
                ReservationCode::Rejected => reply::FLIGHT_FULL.to_string(),
            })
        }
        DeskCommand::Return { flight, seats } => {
            let result = state.inventory.release(&flight, seats);
            let code = ReservationCode::of(&result);
            tracing::debug!("RETURN {} {} on session {}: {:?}", flight, seats, index, code);
            Outcome::Reply(match code {
                ReservationCode::Success => reply::returned(seats, flight.as_str()),
                ReservationCode::Failed => reply::ERROR_OCCURRED.to_string(),
                ReservationCode::Rejected => reply::FLIGHT_OVER_CAPACITY.to_string(),
            })
        }
    };
    Ok(outcome)
}

fn execute_chat(
    state: &mut DeskState,
    index: usize,
    command: ChatCommand,
) -> Result<Outcome, SessionError> {
    let outcome = match command {
        ChatCommand::Text(message) => {
            let session = state.sessions.session(index)?;
            let name = session.username().ok_or(SessionError::Unauthorized)?;
            Outcome::Broadcast(reply::chat_line(name.as_str(), &message))
        }
        ChatCommand::ListChat => Outcome::Reply(state.sessions.list_chat_users()),
        ChatCommand::ListAll => Outcome::Reply(state.sessions.list_all()),
        ChatCommand::ListOffline => Outcome::Reply(state.sessions.list_offline_users()),
        ChatCommand::ExitChat => {
            state.sessions.exit_chat(index)?;
            Outcome::Reply(reply::LEFT_CHAT.to_string())
        }
    };
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{FlightId, Inventory, SessionMode, SessionRegistry, inventory::DEFAULT_MAX_SEATS},
        infrastructure::repository::BTreeFlightStore,
    };

    fn create_test_desk(flights: &[(&str, u32)], ports: usize) -> Arc<Desk> {
        let mut inventory = Inventory::new(Box::new(BTreeFlightStore::new()), DEFAULT_MAX_SEATS);
        for (flight, seats) in flights {
            inventory
                .put(FlightId::try_from(*flight).unwrap(), *seats)
                .unwrap();
        }
        Arc::new(Desk::new(inventory, SessionRegistry::new(ports)))
    }

    fn reply(text: &str) -> Outcome {
        Outcome::Reply(text.to_string())
    }

    #[test]
    fn test_reservation_scenario() {
        // テスト項目: ログオン後の予約・照会・満席のシナリオ
        // given (前提条件):
        let desk = create_test_desk(&[("AA100", 5)], 1);
        let usecase = DispatchUseCase::new(desk.clone());

        // when (操作):
        let logon = usecase.execute(0, "LOGON alice");
        let reserve = usecase.execute(0, "RESERVE AA100 3");
        let query = usecase.execute(0, "QUERY AA100");
        let again = usecase.execute(0, "RESERVE AA100 3");

        // then (期待する結果):
        assert_eq!(logon, reply("Logged on as alice"));
        assert_eq!(reserve, reply("Reserved 3 seats on flight AA100"));
        assert_eq!(query, reply("2"));
        assert_eq!(again, reply("Flight is Full"));
        let aa100 = FlightId::try_from("AA100").unwrap();
        assert_eq!(desk.lock().inventory.get(&aa100), Ok(2));
    }

    #[test]
    fn test_commands_require_logon() {
        // テスト項目: ログオン前のコマンドは拒否され状態は変わらない
        // given (前提条件):
        let desk = create_test_desk(&[("AA100", 5)], 1);
        let usecase = DispatchUseCase::new(desk.clone());

        // when (操作):
        let outcomes: Vec<Outcome> = [
            "ENTER CHAT",
            "QUERY AA100",
            "RESERVE AA100 1",
            "RETURN AA100 1",
            "LIST",
            "L_A",
        ]
        .iter()
        .map(|line| usecase.execute(0, line))
        .collect();

        // then (期待する結果):
        for outcome in outcomes {
            assert_eq!(outcome, reply("Unauthorized: LOGON first"));
        }
        let state = desk.lock();
        assert_eq!(state.inventory.get(&FlightId::try_from("AA100").unwrap()), Ok(5));
        assert_eq!(state.sessions.session(0).unwrap().mode(), SessionMode::Desk);
    }

    #[test]
    fn test_unknown_flight_and_lock_release() {
        // テスト項目: 存在しないフライトはエラー応答になりロックは解放される
        // given (前提条件):
        let desk = create_test_desk(&[("AA100", 5)], 1);
        let usecase = DispatchUseCase::new(desk.clone());
        usecase.execute(0, "LOGON alice");

        // when (操作):
        let query = usecase.execute(0, "QUERY ZZ999");
        let reserve = usecase.execute(0, "RESERVE ZZ999 1");

        // then (期待する結果):
        assert_eq!(query, reply("An error occurred"));
        assert_eq!(reserve, reply("An error occurred"));
        assert!(!desk.is_locked());
    }

    #[test]
    fn test_return_over_capacity() {
        // テスト項目: 上限を超える返却は拒否され座席数は変わらない
        // given (前提条件):
        let desk = create_test_desk(&[("AA100", 39)], 1);
        let usecase = DispatchUseCase::new(desk.clone());
        usecase.execute(0, "LOGON alice");

        // when (操作):
        let rejected = usecase.execute(0, "RETURN AA100 2");
        let accepted = usecase.execute(0, "RETURN AA100 1");

        // then (期待する結果):
        assert_eq!(rejected, reply("Flight cannot hold that many seats"));
        assert_eq!(accepted, reply("Returned 1 seats on flight AA100"));
        assert_eq!(usecase.execute(0, "QUERY AA100"), reply("40"));
    }

    #[test]
    fn test_listings() {
        // テスト項目: LIST と L_A が上限付きで一覧を返す
        // given (前提条件):
        let desk = create_test_desk(&[("AA100", 5), ("BA200", 0), ("CA300", 7)], 1);
        let usecase = DispatchUseCase::new(desk);
        usecase.execute(0, "LOGON alice");

        // when (操作):
        let all = usecase.execute(0, "LIST");
        let first = usecase.execute(0, "LIST 1");
        let available = usecase.execute(0, "LIST_AVAILABLE");
        let available_one = usecase.execute(0, "L_A 1");

        // then (期待する結果):
        assert_eq!(all, reply("AA100 5\nBA200 0\nCA300 7"));
        assert_eq!(first, reply("AA100 5"));
        assert_eq!(available, reply("AA100 5\nCA300 7"));
        assert_eq!(available_one, reply("AA100 5"));
    }

    #[test]
    fn test_chat_mode_transitions() {
        // テスト項目: ENTER CHAT でチャットモードになり EXIT CHAT でデスクモードに戻る
        // given (前提条件):
        let desk = create_test_desk(&[], 2);
        let usecase = DispatchUseCase::new(desk.clone());
        usecase.execute(0, "LOGON alice");
        usecase.execute(1, "LOGON bob");

        // when (操作):
        let entered = usecase.execute(0, "ENTER CHAT");
        let text = usecase.execute(0, "TEXT hello");
        let desk_command_in_chat = usecase.execute(0, "QUERY AA100");
        let users = usecase.execute(0, "LIST_ALL");
        let offline = usecase.execute(0, "LIST_OFFLINE");
        let left = usecase.execute(0, "EXIT CHAT");

        // then (期待する結果):
        assert_eq!(entered, reply("Entered chat as alice"));
        assert_eq!(text, Outcome::Broadcast("[alice] hello".to_string()));
        assert_eq!(desk_command_in_chat, reply("command not recognized: QUERY"));
        assert_eq!(users, reply("alice online\nbob\ntotal: 2"));
        assert_eq!(offline, reply("bob\ntotal: 1"));
        assert_eq!(left, reply("Left chat"));
        let state = desk.lock();
        let session = state.sessions.session(0).unwrap();
        assert!(session.is_logged_on());
        assert_eq!(session.mode(), SessionMode::Desk);
    }

    #[test]
    fn test_logoff_and_exit_terminate() {
        // テスト項目: LOGOFF と EXIT はリスナーループを終了させる
        // given (前提条件):
        let desk = create_test_desk(&[], 2);
        let usecase = DispatchUseCase::new(desk.clone());
        usecase.execute(0, "LOGON alice");

        // when (操作):
        let logoff = usecase.execute(0, "LOGOFF");
        let exit = usecase.execute(1, "EXIT");

        // then (期待する結果):
        assert_eq!(logoff, Outcome::Terminate("Goodbye alice".to_string()));
        assert_eq!(exit, Outcome::Terminate("Goodbye".to_string()));
        assert!(!desk.lock().sessions.session(0).unwrap().is_logged_on());
    }

    #[test]
    fn test_protocol_errors_are_replies() {
        // テスト項目: 解析エラーは応答文になり空行は無応答になる
        // given (前提条件):
        let desk = create_test_desk(&[], 1);
        let usecase = DispatchUseCase::new(desk);

        // when (操作):
        let unknown = usecase.execute(0, "BOOK AA100");
        let missing = usecase.execute(0, "LOGON");
        let empty = usecase.execute(0, "");
        let double = {
            usecase.execute(0, "LOGON alice");
            usecase.execute(0, "LOGON carol")
        };

        // then (期待する結果):
        assert_eq!(unknown, reply("command not recognized: BOOK"));
        assert_eq!(missing, reply("cannot process username"));
        assert_eq!(empty, Outcome::Silent);
        assert_eq!(double, reply("Already logged on as alice"));
    }

    #[test]
    fn test_invalid_session_index() {
        // テスト項目: 範囲外のセッション番号はエラー応答になる
        // given (前提条件):
        let desk = create_test_desk(&[], 1);
        let usecase = DispatchUseCase::new(desk);

        // when (操作):
        let outcome = usecase.execute(3, "LOGON alice");

        // then (期待する結果):
        assert!(matches!(outcome, Outcome::Reply(text) if text.contains('3')));
    }
}
