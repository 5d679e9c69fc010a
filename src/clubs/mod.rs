pub mod estimate;
pub mod session;
pub mod table;

pub use estimate::{
    ellipse_from_shots, profile_from_shots, table_from_shots, ShotEllipse, ShotKind, ShotRecord,
    CHI2_50, CHI2_95,
};
pub use session::{merge_shots, MergeSummary};
pub use table::{ClubProfile, ClubTable, ClubTableError};
