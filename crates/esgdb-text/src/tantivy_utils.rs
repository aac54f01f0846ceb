use tantivy::tokenizer::{LowerCaser, SimpleTokenizer, StopWordFilter, TextAnalyzer, TokenStream};

/// Tokens shorter than this never enter the vocabulary.
pub const MIN_TERM_CHARS: usize = 2;

const STOP_WORDS: &[&str] = &[
	"a","about","above","after","again","all","also","an","and","any","are","as","at","be","been","before","being","between","both","but","by",
	"can","could","did","do","does","doing","during","each","few","for","from","further","had","has","have","having","he","her","here","hers",
	"him","his","how","i","if","in","into","is","it","its","itself","me","might","more","most","must","my","no","nor","not","of","off","on",
	"once","only","or","other","our","ours","out","over","own","same","shall","she","should","so","some","such","than","that","the","their",
	"theirs","them","then","there","these","they","this","those","through","to","too","under","until","up","us","very","was","we","were",
	"what","when","where","which","while","who","whom","whose","why","will","with","would","you","your","yours",
];

/// Lowercasing, stop-word-removing analyzer shared by index build and query
/// projection. Both sides must tokenize identically. There is no upper
/// length cap on tokens.
pub fn build_analyzer() -> TextAnalyzer {
	TextAnalyzer::builder(SimpleTokenizer::default())
		.filter(LowerCaser)
		.filter(StopWordFilter::remove(STOP_WORDS.iter().map(|s| s.to_string())))
		.build()
}

pub fn analyze(analyzer: &mut TextAnalyzer, text: &str) -> Vec<String> {
	let mut terms = Vec::new();
	let mut stream = analyzer.token_stream(text);
	while stream.advance() {
		let term = &stream.token().text;
		if term.chars().count() >= MIN_TERM_CHARS { terms.push(term.clone()); }
	}
	terms
}
