//! Literal contents of the files seeded into a new repository.
//!
//! Everything here is a pure function of the invocation parameters, so the
//! same inputs always produce byte-identical files.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::InvocationParameters;

/// Encoding tag sent with every blob.
pub const DEFAULT_ENCODING: &str = "utf-8";

pub const README_PATH: &str = "README.md";
pub const HANDLER_PATH: &str = "api/hello.go";

const HANDLER_SOURCE: &str = concat!(
    "package api\n",
    "\n",
    "import (\n",
    "\t\"fmt\"\n",
    "\t\"net/http\"\n",
    ")\n",
    "\n",
    "func Hello(w http.ResponseWriter, r *http.Request) {\n",
    "\tfmt.Fprintf(w, \"Hello World!\\n\")\n",
    "}",
);

const FUNCTION_MEMORY_MB: u32 = 1024;
const FUNCTION_MAX_DURATION_SECS: u32 = 10;

/// Blob creation payload: raw text plus its encoding tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlobRequest {
    pub content: String,
    pub encoding: &'static str,
}

impl BlobRequest {
    fn utf8(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            encoding: DEFAULT_ENCODING,
        }
    }
}

/// The files added by the bootstrap commit, in upload and tree order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedFile {
    GitIgnore,
    GoMod,
    VercelConfig,
    Handler,
}

impl SeedFile {
    pub const ALL: [SeedFile; 4] = [
        SeedFile::GitIgnore,
        SeedFile::GoMod,
        SeedFile::VercelConfig,
        SeedFile::Handler,
    ];

    /// Repository path the file is committed under.
    pub fn path(self) -> &'static str {
        match self {
            SeedFile::GitIgnore => ".gitignore",
            SeedFile::GoMod => "go.mod",
            SeedFile::VercelConfig => "vercel.json",
            SeedFile::Handler => HANDLER_PATH,
        }
    }

    pub fn blob(self, params: &InvocationParameters) -> BlobRequest {
        match self {
            SeedFile::GitIgnore => gitignore(),
            SeedFile::GoMod => go_mod(
                &params.github_username,
                &params.app_name,
                &params.go_version,
            ),
            SeedFile::VercelConfig => vercel_config(),
            SeedFile::Handler => hello_handler(),
        }
    }
}

#[derive(Serialize)]
struct VercelConfig {
    github: VercelGithubConfig,
    functions: BTreeMap<&'static str, VercelFunctionConfig>,
}

#[derive(Serialize)]
struct VercelGithubConfig {
    silent: bool,
    enabled: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VercelFunctionConfig {
    memory: u32,
    max_duration: u32,
}

/// Public URL of the sample handler once Vercel has deployed it.
pub fn deployment_link(app_name: &str, username: &str) -> String {
    format!("https://{}-{}.vercel.app/api/hello", app_name, username)
}

pub fn readme(app_name: &str, link: &str) -> String {
    format!(
        "# {}\n\nGolang Serverless App hosted by Vercel\n\nGo to {}",
        app_name, link
    )
}

pub fn gitignore() -> BlobRequest {
    BlobRequest::utf8(".vercel\n.env")
}

pub fn go_mod(username: &str, app_name: &str, go_version: &str) -> BlobRequest {
    BlobRequest::utf8(format!(
        "module github.com/{}/{}\n\ngo {}",
        username, app_name, go_version
    ))
}

/// `vercel.json`, pretty-printed with four-space indentation.
pub fn vercel_config() -> BlobRequest {
    let config = VercelConfig {
        github: VercelGithubConfig {
            silent: true,
            enabled: true,
        },
        functions: BTreeMap::from([(
            HANDLER_PATH,
            VercelFunctionConfig {
                memory: FUNCTION_MEMORY_MB,
                max_duration: FUNCTION_MAX_DURATION_SECS,
            },
        )]),
    };

    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    config
        .serialize(&mut serializer)
        .expect("vercel config is plain data");
    BlobRequest::utf8(String::from_utf8_lossy(&out))
}

pub fn hello_handler() -> BlobRequest {
    BlobRequest::utf8(HANDLER_SOURCE)
}
