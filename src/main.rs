use anyhow::Context;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let app = whorl::WhorlApp::new().context("failed to create application")?;
    app.run().context("event loop terminated with an error")
}
