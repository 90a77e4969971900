pub mod mediawiki;
pub mod source;

pub use mediawiki::MediaWikiSource;
pub use source::WikiSource;
