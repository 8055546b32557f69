use chrono::NaiveDate;
use mlb_api::client::{ApiResult, MlbApi};
use mlb_api::{Boxscore, GameBroadcastInfo, GameId, PersonId, ScheduledGame, StatcastStatus};

/// The remote data the pipelines read. Implemented by [`MlbApi`]; tests
/// substitute an in-memory source.
#[allow(async_fn_in_trait)]
pub trait GameSource {
    async fn schedule(&self, date: NaiveDate) -> ApiResult<Vec<ScheduledGame>>;
    async fn broadcasts(&self, date: NaiveDate) -> ApiResult<Vec<GameBroadcastInfo>>;
    async fn boxscore(&self, game_id: GameId) -> ApiResult<Option<Boxscore>>;
    async fn statcast_status(&self, game_id: GameId) -> ApiResult<StatcastStatus>;
    async fn player_name(&self, person_id: PersonId) -> ApiResult<String>;
}

impl GameSource for MlbApi {
    async fn schedule(&self, date: NaiveDate) -> ApiResult<Vec<ScheduledGame>> {
        self.fetch_schedule(date).await
    }

    async fn broadcasts(&self, date: NaiveDate) -> ApiResult<Vec<GameBroadcastInfo>> {
        self.fetch_broadcasts(date).await
    }

    async fn boxscore(&self, game_id: GameId) -> ApiResult<Option<Boxscore>> {
        self.fetch_boxscore(game_id).await
    }

    async fn statcast_status(&self, game_id: GameId) -> ApiResult<StatcastStatus> {
        self.fetch_statcast_status(game_id).await
    }

    async fn player_name(&self, person_id: PersonId) -> ApiResult<String> {
        self.fetch_player_name(person_id).await
    }
}
