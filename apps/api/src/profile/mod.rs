// Profile completion: the character registry and the evaluator that scores
// a user's profile items against it. Pure functions, no I/O.

pub mod characters;
pub mod completion;
pub mod handlers;
pub mod models;
