use glog_trace::{launch, telemetry};

fn main() -> anyhow::Result<()> {
    telemetry::init_telemetry();
    launch::main()
}
