mod catalog;
mod ids;
mod recording;
mod rule;
mod session;
mod tags;

pub use catalog::{
    format_duration, CatalogPlaylist, CommitPlaylistRequest, CommitPlaylistResponse,
    CommitTarget,
};
pub use ids::{Mbid, PlaylistId, RecordingId, SessionId};
pub use recording::{ArtistRef, RadioPlaylist, RadioResponse, Recording, ReleaseRef};
pub use rule::{
    ArtistRule, Difficulty, GenreRule, JoinMode, NormalizedRule, Prompt, Rule, DEFAULT_WEIGHT,
};
pub use session::{CreateSessionRequest, CreateSessionResponse, Session};
pub use tags::{
    artist_options, tag_options, ArtistCount, SelectOption, SortDirection, SortInfo, SortType,
    TagCount, Tags,
};
