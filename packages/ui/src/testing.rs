//! Scripted backend doubles shared by the controller tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use backend::{Error, ErrorKind, Session, SignUpResult, User};

use crate::api::AuthApi;

pub fn session_fixture(user_id: &str) -> Session {
    Session {
        access_token: "at".into(),
        refresh_token: "rt".into(),
        token_type: "bearer".into(),
        expires_in: None,
        expires_at: None,
        user: User {
            id: user_id.into(),
            email: Some(format!("{user_id}@clinic.example")),
        },
    }
}

pub fn network_error() -> Error {
    Error::new(ErrorKind::Network, "Network request failed")
}

/// Auth backend that replays scripted results and counts calls. When a
/// script runs dry the corresponding call panics, so a test that makes
/// more calls than it declared fails loudly.
#[derive(Default)]
pub struct FakeAuth {
    pub session_results: RefCell<VecDeque<Result<Option<Session>, Error>>>,
    pub sign_in_results: RefCell<VecDeque<Result<Session, Error>>>,
    pub sign_up_results: RefCell<VecDeque<Result<SignUpResult, Error>>>,
    pub session_calls: Cell<u32>,
    pub sign_in_calls: Cell<u32>,
    pub sign_up_calls: Cell<u32>,
}

impl FakeAuth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_session(&self, result: Result<Option<Session>, Error>) -> &Self {
        self.session_results.borrow_mut().push_back(result);
        self
    }

    pub fn push_sign_in(&self, result: Result<Session, Error>) -> &Self {
        self.sign_in_results.borrow_mut().push_back(result);
        self
    }

    pub fn push_sign_up(&self, result: Result<SignUpResult, Error>) -> &Self {
        self.sign_up_results.borrow_mut().push_back(result);
        self
    }
}

impl AuthApi for FakeAuth {
    async fn get_session(&self) -> Result<Option<Session>, Error> {
        self.session_calls.set(self.session_calls.get() + 1);
        self.session_results
            .borrow_mut()
            .pop_front()
            .expect("unscripted get_session call")
    }

    async fn sign_in_with_password(&self, _email: &str, _password: &str) -> Result<Session, Error> {
        self.sign_in_calls.set(self.sign_in_calls.get() + 1);
        self.sign_in_results
            .borrow_mut()
            .pop_front()
            .expect("unscripted sign_in call")
    }

    async fn sign_up(&self, _email: &str, _password: &str) -> Result<SignUpResult, Error> {
        self.sign_up_calls.set(self.sign_up_calls.get() + 1);
        self.sign_up_results
            .borrow_mut()
            .pop_front()
            .expect("unscripted sign_up call")
    }
}
