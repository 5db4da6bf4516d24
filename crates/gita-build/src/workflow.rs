use gita_core::ReleaseConfig;

/// `${{ secrets.NAME }}`
fn secret(name: &str) -> String {
    format!("${{{{ secrets.{name} }}}}")
}

/// GitHub Actions workflow that builds and pushes the server image when a
/// release is published.
///
/// The registry user comes from the username secret, so the pushed image
/// is `<user>/<image_prefix>-<tag>:<image_tag>`.
pub fn render_release_workflow(config: &ReleaseConfig) -> String {
    let username = secret(&config.username_secret);
    let token = secret(&config.token_secret);
    let release_tag = "${{ steps.release.outputs.tag }}";

    format!(
        r#"# Generated by: gita workflow
name: Release image

on:
  release:
    types: [published]

jobs:
  publish:
    runs-on: ubuntu-latest

    steps:
      - name: Checkout
        uses: actions/checkout@v4

      - name: Set up QEMU
        uses: docker/setup-qemu-action@v3

      - name: Set up Docker Buildx
        uses: docker/setup-buildx-action@v3

      - name: Log in to Docker Hub
        uses: docker/login-action@v3
        with:
          username: {username}
          password: {token}

      - name: Extract release tag
        id: release
        run: echo "tag=${{GITHUB_REF#refs/tags/}}" >> "$GITHUB_OUTPUT"

      - name: Build and push
        uses: docker/build-push-action@v6
        with:
          context: .
          file: ./{dockerfile}
          platforms: {platforms}
          push: true
          tags: {username}/{prefix}-{release_tag}:{image_tag}
"#,
        dockerfile = config.dockerfile,
        platforms = config.platforms.join(","),
        prefix = config.image_prefix,
        image_tag = config.image_tag,
    )
}
