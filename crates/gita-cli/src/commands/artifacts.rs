use std::path::Path;

use anyhow::Context;
use gita_build::eject::write_new;
use gita_build::{
    DockerfileGenerator, ImageRef, RecipeVariant, render_release_workflow, tag_from_ref,
};
use gita_core::GitaConfig;

const WORKFLOW_PATH: &str = ".github/workflows/release.yml";

pub fn dockerfile(config: &GitaConfig, variant: RecipeVariant) {
    let generator = DockerfileGenerator::new(&config.build, config.server.port);
    print!("{}", generator.render(variant));
}

pub fn workflow(config: &GitaConfig) {
    print!("{}", render_release_workflow(&config.release));
}

pub fn image(config: &GitaConfig, reference: &str, user: &str) -> anyhow::Result<()> {
    let tag = tag_from_ref(reference)
        .with_context(|| format!("{reference:?} is not a release tag reference"))?;
    println!("{}", ImageRef::for_release(user, &config.release, tag));
    Ok(())
}

pub fn eject(config: &GitaConfig) -> anyhow::Result<()> {
    let generator = DockerfileGenerator::new(&config.build, config.server.port);

    for variant in [RecipeVariant::Toolchain, RecipeVariant::Slim] {
        let path = Path::new(variant.file_name());
        write_new(path, &generator.render(variant))?;
        println!("Wrote {}", path.display());
    }

    write_new(Path::new(WORKFLOW_PATH), &render_release_workflow(&config.release))?;
    println!("Wrote {WORKFLOW_PATH}");

    println!(
        "Set the {} and {} repository secrets before publishing a release.",
        config.release.username_secret, config.release.token_secret
    );
    Ok(())
}
