pub mod corpus;
pub mod profile;
pub mod recommendation;
