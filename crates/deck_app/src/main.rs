fn main() -> anyhow::Result<()> {
    deck_app::run()
}
