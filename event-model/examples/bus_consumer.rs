/// 总线消费示例
/// 模拟从总线收到的一批原始 JSON 内容，按判别符分发为类型化事件并分别处理
use anyhow::Result as AnyResult;
use event_model::{
    Event, EventRegistry, Field, MeasureRequestedEvent, ModelEvent, SetMachineDataEvent,
};
use serde_json::{Value, json};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn inbound_messages() -> Vec<Value> {
    let field = Field::builder()
        .name("spindleSpeed")
        .machine_value_type("INT")
        .unit("rpm")
        .visualization_type("GAUGE")
        .visualization_level("1")
        .value("1450")
        .build();

    let machine = SetMachineDataEvent::builder()
        .vendor_id("acme")
        .machine_id("press-7")
        .serial_number("SN-0042")
        .station_id("station-3")
        .site_id("plant-1")
        .fields(vec![field])
        .build();

    let measure = MeasureRequestedEvent::builder()
        .measure_id("measure:cleaning")
        .target_group("operators")
        .build();

    vec![
        Value::Object(machine.to_content()),
        Value::Object(measure.to_content()),
        json!({ "id": "x-1", "modelId": "processStart", "payload": { "processId": "p-9" } }),
        json!({ "id": "x-2", "modelId": "measureCompleted", "payload": {} }),
    ]
}

fn main() -> AnyResult<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let registry = EventRegistry::new();

    for message in inbound_messages() {
        let Some(content) = message.as_object() else {
            continue;
        };

        match registry.dispatch(content) {
            Ok(Event::SetMachineData(event)) => {
                for field in event.fields() {
                    println!(
                        "[{}] {} = {} {}",
                        event.machine_id().unwrap_or("?"),
                        field.name().unwrap_or("?"),
                        field.value().unwrap_or("?"),
                        field.unit().unwrap_or(""),
                    );
                }
            }
            Ok(Event::MeasureRequested(event)) => {
                println!(
                    "measure requested: {} -> {}",
                    event.measure_id().unwrap_or("?"),
                    event.target_group().unwrap_or("?")
                );
            }
            Ok(Event::Unknown(envelope)) => {
                println!("unhandled model id: {}", envelope.model_id());
            }
            Ok(other) => println!("event {} ({})", other.id(), other.model_id()),
            Err(err) => println!("rejected message: {err}"),
        }
    }

    let requested = MeasureRequestedEvent::builder()
        .id("outbound-1")
        .measure_id("measure:restart")
        .target_group("maintenance")
        .build();
    println!("{}", serde_json::to_string_pretty(requested.envelope())?);

    Ok(())
}
