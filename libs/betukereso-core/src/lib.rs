//! Practice session engine shared by the backend and any local front end.
//!
//! Provides:
//! - Hungarian grapheme catalog with trouble-letter bias data
//! - Weighted round selection and pinned display casing
//! - Answer evaluators (exact, pair, adult verdict, trace accuracy)
//! - Streak and sticker reward state machine
//! - Shared types (Child, ChildSettings, Sticker, etc.)

pub mod case;
pub mod catalog;
pub mod error;
pub mod evaluate;
pub mod progress;
pub mod reward;
pub mod round;
pub mod session;
pub mod types;

pub use case::{apply_case, CaseStyle, DisplayLetter};
pub use catalog::{Catalog, GraphemeInfo};
pub use error::{EngineError, Result};
pub use evaluate::{evaluate, AnswerInput};
pub use evaluate::pair::{PairBoard, PairCard, PairOutcome};
pub use evaluate::trace::{GlyphSurface, Point, Tool, TraceScore, TraceSession};
pub use progress::{record_answer, AnswerOutcome};
pub use reward::{sticker_probability, AwardTrigger, StickerDesign};
pub use round::{select_round, PoolConfig};
pub use session::{FindLetterRound, LetterPrompt, SessionProgress, TraceRound};
pub use types::{
    Child, ChildSettings, Difficulty, GameMode, Grapheme, GraphemeProgress, LetterCase,
    ProgressUpdate, SettingsUpdate, Sticker,
};
