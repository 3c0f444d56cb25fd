use std::io::Write;

/// Configures env_logger once for the whole process; records go to stdout.
pub fn init_logger(level: log::LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Stdout)
        .format(|buf, record| {
            let ts = buf.timestamp_seconds();
            writeln!(buf, "{ts} - {} - {}", record.level(), record.args())
        })
        .init();
}
