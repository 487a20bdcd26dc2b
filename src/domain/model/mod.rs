pub mod artifacts;
pub mod similarity;
pub mod sparse;
pub mod stopwords;
pub mod tokenizer;
pub mod vectorizer;
