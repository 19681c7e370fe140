//! Backend seams the controllers are generic over.
//!
//! Controllers never hold a concrete [`backend::Client`]; they take these
//! traits so tests can script the backend. The real client implements
//! both.

use backend::{Client, Error, Order, Session, SignUpResult};

use crate::notes::Note;

/// The slice of the auth surface the controllers use.
pub trait AuthApi {
    fn get_session(&self) -> impl std::future::Future<Output = Result<Option<Session>, Error>>;
    fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<Session, Error>>;
    fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<SignUpResult, Error>>;
}

impl AuthApi for backend::Auth {
    async fn get_session(&self) -> Result<Option<Session>, Error> {
        backend::Auth::get_session(self).await
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, Error> {
        backend::Auth::sign_in_with_password(self, email, password).await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpResult, Error> {
        backend::Auth::sign_up(self, email, password).await
    }
}

/// Note queries for the list screen.
pub trait NotesApi {
    /// All notes owned by `user_id`, newest first.
    fn notes_for(&self, user_id: &str) -> impl std::future::Future<Output = Result<Vec<Note>, Error>>;
}

impl NotesApi for Client {
    async fn notes_for(&self, user_id: &str) -> Result<Vec<Note>, Error> {
        self.from("notes")
            .select("*")
            .eq("user_id", user_id)
            .order("created_at", Order::Descending)
            .fetch()
            .await
    }
}
