//! The starter files compiled into the binary, keyed by their path relative to the
//! root of the generated project

pub const BABELRC: &str = include_str!("babelrc");
pub const ESLINTRC: &str = include_str!("eslintrc.json");
pub const PRETTIERRC: &str = include_str!("prettierrc");
pub const GITIGNORE: &str = include_str!("gitignore");
pub const TSCONFIG: &str = include_str!("tsconfig.json");
pub const INDEX_HTML: &str = include_str!("index.html");
pub const INDEX_CSS: &str = include_str!("index.css");
pub const INDEX_TSX: &str = include_str!("index.tsx");
pub const APP_COMPONENT: &str = include_str!("App.tsx");

pub const FILES: [(&str, &str); 9] = [
    (".babelrc", BABELRC),
    (".eslintrc.json", ESLINTRC),
    (".gitignore", GITIGNORE),
    (".prettierrc", PRETTIERRC),
    ("src/components/App.tsx", APP_COMPONENT),
    ("src/index.css", INDEX_CSS),
    ("src/index.html", INDEX_HTML),
    ("src/index.tsx", INDEX_TSX),
    ("tsconfig.json", TSCONFIG),
];
