use gita_core::BuildConfig;

/// Binary built and launched by every recipe.
pub const BINARY: &str = "gita";

/// Which image recipe to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecipeVariant {
    /// Installs `toolchain_packages` in the build stages.
    #[default]
    Toolchain,
    /// Same stages without the toolchain install.
    Slim,
}

impl RecipeVariant {
    /// File name the checked-in recipe uses.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Toolchain => "Dockerfile",
            Self::Slim => "Dockerfile.slim",
        }
    }
}

/// Generates a multi-stage Dockerfile using Cargo Chef.
pub struct DockerfileGenerator<'a> {
    config: &'a BuildConfig,
    port: u16,
}

impl<'a> DockerfileGenerator<'a> {
    pub fn new(config: &'a BuildConfig, port: u16) -> Self {
        Self { config, port }
    }

    pub fn render(&self, variant: RecipeVariant) -> String {
        let toolchain = match variant {
            RecipeVariant::Toolchain if !self.config.toolchain_packages.is_empty() => format!(
                "RUN apt-get update && apt-get install -y --no-install-recommends {} && rm -rf /var/lib/apt/lists/*\n",
                self.config.toolchain_packages.join(" ")
            ),
            _ => String::new(),
        };

        format!(
            r#"# === Base: cargo-chef installed once ===
FROM {base} AS chef
RUN cargo install cargo-chef --version {chef_version} --locked
WORKDIR /app

# === Stage 1: Planner ===
FROM chef AS planner
COPY . .
RUN cargo chef prepare --recipe-path recipe.json

# === Stage 2: Cacher (dependency build) ===
FROM chef AS cacher
{toolchain}COPY --from=planner /app/recipe.json recipe.json
RUN cargo chef cook --release --recipe-path recipe.json

# === Stage 3: Builder ===
FROM chef AS builder
{toolchain}COPY --from=cacher /app/target target
COPY --from=cacher /usr/local/cargo /usr/local/cargo
COPY . .
RUN cargo build --release --bin {binary}

# === Stage 4: Runtime ===
FROM {runtime}
RUN apt-get update && apt-get install -y --no-install-recommends ca-certificates libssl3 && rm -rf /var/lib/apt/lists/*
WORKDIR /app
COPY --from=builder /app/target/release/{binary} /usr/local/bin/{binary}
# GEMINI_API_KEY is injected at run time; cert.pem and key.pem are mounted into /app.
EXPOSE {port}
CMD ["{binary}", "serve", "--tls-cert", "cert.pem", "--tls-key", "key.pem"]
"#,
            base = self.config.base_image,
            chef_version = self.config.cargo_chef_version,
            runtime = self.config.runtime_image,
            binary = BINARY,
            port = self.port,
            toolchain = toolchain,
        )
    }
}
