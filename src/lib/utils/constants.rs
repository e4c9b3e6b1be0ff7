//! Constant value definitions to use across the whole program

pub const CREATE_PIKA_APP: &str = "create-pika-app";

pub const MANIFEST_FILE_NAME: &str = "package.json";
pub const ISSUES_URL: &str = "https://github.com/ndom91/create-pika-app/issues/new";
pub const EXAMPLE_PROJECT_NAME: &str = "my-pika-app";

/// The names of the directories involved on locating the on-disk template, not their paths
pub mod dir_names {
    pub const ASSETS: &str = "assets";
    pub const TEMPLATES: &str = "templates";
    pub const NODE_MODULES: &str = "node_modules";
}

/// The fixed `scripts` entries written into every generated manifest, in the order they
/// are inserted
pub const SCRIPTS: [(&str, &str); 11] = [
    ("build", "pika-web --dest dist/web_modules"),
    (
        "build:esm",
        "npm run build:ts && npm run build:esm && npm run build:js && npm run copy",
    ),
    (
        "build:js",
        "babel dist -d dist --ignore 'dist/web_modules/*.js'",
    ),
    (
        "build:js:watch",
        "babel dist -d dist --ignore 'dist/web_modules/*.js' --watch",
    ),
    ("build:ts", "rm -rf dist && tsc"),
    ("build:ts:watch", "tsc -w"),
    (
        "copy",
        "copyfiles 'src/*.html' 'src/**/*.gif' 'src/*.css' dist -u 1",
    ),
    (
        "dev",
        "npm run build && concurrently 'npm run build:ts:watch' 'npm run build:js:watch' 'serve -s dist'",
    ),
    (
        "lint",
        "eslint --ext .ts,.tsx src --ignore 'web_modules/**/*.js'",
    ),
    ("prestart", "npm run build"),
    ("start", "serve -s dist"),
];

pub const PIKA_WEB_KEY: &str = "@pika/web";
pub const WEB_DEPENDENCIES: [&str; 5] = [
    "emotion",
    "preact",
    "preact-compat",
    "preact-emotion",
    "preact-router",
];

pub const DEPENDENCIES: [&str; 5] = [
    "preact",
    "preact-compat",
    "preact-emotion",
    "preact-router",
    "emotion",
];

pub const DEV_DEPENDENCIES: [&str; 25] = [
    "@babel/cli",
    "@babel/core",
    "@babel/plugin-proposal-class-properties",
    "@babel/plugin-proposal-object-rest-spread",
    "@babel/plugin-transform-react-jsx",
    "@babel/preset-env",
    "@babel/preset-react",
    "@babel/preset-typescript",
    "@pika/web",
    "@typescript-eslint/eslint-plugin",
    "@typescript-eslint/parser",
    "babel-plugin-import-pika-web",
    "babel-plugin-module-resolver",
    "concurrently",
    "copyfiles",
    "prettier",
    "eslint",
    "eslint-config-airbnb-typescript",
    "eslint-config-prettier",
    "eslint-plugin-import",
    "eslint-plugin-jsx-a11y",
    "eslint-plugin-prettier",
    "eslint-plugin-react",
    "serve",
    "typescript",
];

/// What the progress lines name while the runtime dependencies are installed
pub const DEPENDENCIES_HEADLINE: [&str; 5] = [
    "preact",
    "preact-compat",
    "emotion",
    "preact-emotion",
    "preact-router",
];

/// What the progress lines name while the development dependencies are installed
pub const DEV_DEPENDENCIES_HEADLINE: [&str; 5] =
    ["@pika/web", "typescript", "eslint", "serve", "babel"];

/// Packages whose local installation is inspected by the `--info` report
pub const INSPECTED_PACKAGES: [&str; 4] = ["preact", "preact-compat", "@pika/web", "preact-emotion"];

pub const NOT_FOUND: &str = "Not Found";

pub mod error_messages {
    pub const FAILURE_GATHERING_CWD: &str = "Could not determine the current working directory";
    pub const FAILURE_CREATING_PROJECT: &str =
        "Something went wrong while trying to create a new Preact app using create-pika-app";
    pub const READ_MANIFEST: &str = "Could not read the package manifest";
    pub const WRITE_MANIFEST: &str = "Could not write the package manifest";
    pub const FAILURE_RESOLVING_TEMPLATE: &str = "Could not resolve the project template";
    pub const FAILURE_GATHERING_ENV_INFO: &str = "Failed to gather the environment information";
}
