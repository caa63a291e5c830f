use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use parking_lot::Mutex;
use rand::seq::SliceRandom;
use std::sync::Arc;
use tracing::{info, warn};

use lexicard_core::{apply_judgment, CoreError, Judgment, Repository, TierSizes};

use crate::api::dto::*;
use crate::api::sessions::{Session, SessionId, SessionStore};
use crate::settings::{add_deck as add_session_deck, EngineSettings};

pub struct AppState {
    pub repo: Arc<dyn Repository>,
    pub sessions: SessionStore,
    pub settings: EngineSettings,
}

fn status_of(e: CoreError) -> StatusCode {
    match e {
        CoreError::EmptyPool
        | CoreError::InsufficientUniqueCards { .. }
        | CoreError::CapacityExceeded { .. }
        | CoreError::Conflict(_) => StatusCode::CONFLICT,
        CoreError::NotFound(_) => StatusCode::NOT_FOUND,
        CoreError::Invalid(_) => StatusCode::BAD_REQUEST,
        CoreError::Storage(_) => {
            warn!(error = %e, "storage failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn session(st: &AppState, id: &SessionId) -> Result<Arc<Mutex<Session>>, StatusCode> {
    st.sessions.get(id).ok_or(StatusCode::NOT_FOUND)
}

pub async fn list_decks(State(st): State<Arc<AppState>>) -> Result<Json<Vec<DeckOut>>, StatusCode> {
    let mut decks = st.repo.list_decks().await.map_err(status_of)?;
    decks.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(Json(decks.into_iter().map(|d| DeckOut {
        cards: d.cards.len(), name: d.name, author: d.author, description: d.description,
        target_language: d.target_language,
    }).collect()))
}

pub async fn create_session(State(st): State<Arc<AppState>>, Json(body): Json<SessionIn>)
    -> Result<(StatusCode, Json<SessionOut>), StatusCode>
{
    let (engine, origins) = st.settings.build_from_decks(&*st.repo, &body.decks).await.map_err(status_of)?;
    let sizes = engine.sizes();
    let id = st.sessions.create(body.decks.clone(), engine, origins);
    info!(session = %id, decks = ?body.decks, "session created");
    Ok((StatusCode::CREATED, Json(SessionOut { session_id: id, decks: body.decks, sizes })))
}

pub async fn delete_session(State(st): State<Arc<AppState>>, Path(id): Path<SessionId>) -> StatusCode {
    if st.sessions.remove(&id) { StatusCode::NO_CONTENT } else { StatusCode::NOT_FOUND }
}

pub async fn add_deck(State(st): State<Arc<AppState>>, Path(id): Path<SessionId>, Json(body): Json<AddDeckIn>)
    -> Result<Json<AddDeckOut>, StatusCode>
{
    let s = session(&st, &id)?;
    let deck = st.repo.get_deck(&body.deck).await.map_err(status_of)?;
    let name = deck.name.clone();
    let mut guard = s.lock();
    let s = &mut *guard;
    let added = add_session_deck(&mut s.engine, &mut s.origins, deck).map_err(status_of)?;
    s.decks.push(name);
    Ok(Json(AddDeckOut { added, sizes: s.engine.sizes() }))
}

pub async fn current_card(State(st): State<Arc<AppState>>, Path(id): Path<SessionId>) -> Result<Json<CardOut>, StatusCode> {
    let s = session(&st, &id)?;
    let card = s.lock().engine.get_current_card().map_err(status_of)?;
    Ok(Json(CardOut::from(&card)))
}

pub async fn next_card(State(st): State<Arc<AppState>>, Path(id): Path<SessionId>) -> Result<Json<CardOut>, StatusCode> {
    let s = session(&st, &id)?;
    let card = s.lock().engine.pick_next().map_err(status_of)?;
    Ok(Json(CardOut::from(&card)))
}

pub async fn quiz(State(st): State<Arc<AppState>>, Path(id): Path<SessionId>) -> Result<Json<QuizOut>, StatusCode> {
    let s = session(&st, &id)?;
    let set = s.lock().engine.pick_distractor_set().map_err(status_of)?;
    let mut choices: Vec<CardOut> = set
        .choices()
        .map(|cs| cs.iter().map(|c| CardOut::from(*c)).collect())
        .unwrap_or_default();
    choices.shuffle(&mut rand::thread_rng());
    Ok(Json(QuizOut { question: CardOut::from(&set.question), complete: set.is_complete(), choices }))
}

pub async fn judge(State(st): State<Arc<AppState>>, Path(id): Path<SessionId>, Json(body): Json<JudgeIn>)
    -> Result<Json<JudgeOut>, StatusCode>
{
    let judgment = Judgment::parse(&body.judgment).ok_or(StatusCode::BAD_REQUEST)?;
    let s = session(&st, &id)?;
    let mut s = s.lock();
    let transition = apply_judgment(&mut s.engine, body.card_id, judgment);
    s.score.record(&judgment);
    Ok(Json(JudgeOut { transition, score: s.score.clone(), sizes: s.engine.sizes() }))
}

pub async fn sizes(State(st): State<Arc<AppState>>, Path(id): Path<SessionId>) -> Result<Json<TierSizes>, StatusCode> {
    let s = session(&st, &id)?;
    let sizes = s.lock().engine.sizes();
    Ok(Json(sizes))
}

pub async fn forget(State(st): State<Arc<AppState>>, Path(id): Path<SessionId>, Json(body): Json<ForgetIn>)
    -> Result<Json<ForgetOut>, StatusCode>
{
    let s = session(&st, &id)?;
    let mut s = s.lock();
    let dropped = match body.scope {
        ForgetScope::Known => s.engine.forget_known(),
        ForgetScope::All => s.engine.forget_all(),
    };
    Ok(Json(ForgetOut { dropped, sizes: s.engine.sizes() }))
}
