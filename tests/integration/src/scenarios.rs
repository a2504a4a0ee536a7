#![cfg(test)]
use crate::support::{LogCapture, ScriptedLoader, ScriptedRouter};
use fritzpoll_core::catalog::{MetricDescriptor, DEFAULT_CATALOG, WAN_COMMON_INTERFACE_CONFIG, WAN_IP_CONNECTION};
use fritzpoll_core::input::{Fritzbox, Input};
use fritzpoll_core::sink::MemoryAccumulator;
use fritzpoll_core::PollCycle;
use shared::config::FritzboxConfig;
use shared::{FieldSet, FieldValue, FritzpollError, TagSet};

static CATALOG: &[MetricDescriptor] = &[
  MetricDescriptor::new("S", "A", "X", "x"),
  MetricDescriptor::new("S", "A", "Y", "y"),
  MetricDescriptor::new("S2", "B", "Z", "z"),
];

fn fields(values: &[(&str, i64)]) -> FieldSet {
  values
    .iter()
    .map(|(k, v)| (k.to_string(), FieldValue::from(*v)))
    .collect()
}

fn host_tag(host: &str) -> TagSet {
  TagSet::from([("host".to_string(), host.to_string())])
}

#[test]
fn shared_action_is_called_once() {
  let router = ScriptedRouter::new()
    .action("S", "A", &[("X", 1), ("Y", 2)])
    .action("S2", "B", &[("Z", 3)]);
  let log = router.log();
  let loader = ScriptedLoader::new(router);
  let mut acc = MemoryAccumulator::new();

  PollCycle::new(&loader, CATALOG)
    .run(&FritzboxConfig::default(), &mut acc)
    .unwrap();

  assert_eq!(log.calls("A"), 1);
  assert_eq!(log.calls("B"), 1);
  assert_eq!(acc.len(), 1);
  let m = &acc.measurements()[0];
  assert_eq!(m.name, "fritzbox");
  assert_eq!(m.fields, fields(&[("x", 1), ("y", 2), ("z", 3)]));
  assert_eq!(m.tags, host_tag("fritz.box"));
}

#[test]
fn missing_service_is_skipped() {
  let router = ScriptedRouter::new().action("S", "A", &[("X", 1), ("Y", 2)]);
  let log = router.log();
  let loader = ScriptedLoader::new(router);
  let mut acc = MemoryAccumulator::new();
  let logs = LogCapture::new();

  let report = logs
    .run(|| PollCycle::new(&loader, CATALOG).run(&FritzboxConfig::default(), &mut acc))
    .unwrap();

  assert_eq!(log.calls("B"), 0);
  assert_eq!(acc.measurements()[0].fields, fields(&[("x", 1), ("y", 2)]));
  assert_eq!(report.skipped.get("service_not_found"), Some(&1));
  assert_eq!(report.fields_collected, 2);

  let warnings = logs.lines_at("WARN");
  assert_eq!(warnings.len(), 1, "warnings: {warnings:?}");
  assert!(warnings[0].contains("S2"));
  assert!(logs.lines_at("ERROR").is_empty());
}

#[test]
fn missing_action_is_logged_as_warning() {
  let router = ScriptedRouter::new()
    .action("S", "A", &[("X", 1), ("Y", 2)])
    .action("S2", "C", &[("Z", 3)]);
  let loader = ScriptedLoader::new(router);
  let mut acc = MemoryAccumulator::new();
  let logs = LogCapture::new();

  logs
    .run(|| PollCycle::new(&loader, CATALOG).run(&FritzboxConfig::default(), &mut acc))
    .unwrap();

  let warnings = logs.lines_at("WARN");
  assert_eq!(warnings.len(), 1, "warnings: {warnings:?}");
  assert!(warnings[0].contains("'B'"));
  assert!(warnings[0].contains("S2"));
}

#[test]
fn failed_call_is_logged_as_error_and_skipped() {
  let router = ScriptedRouter::new()
    .failing("S", "A", "SOAP fault 501 Action Failed")
    .action("S2", "B", &[("Z", 3)]);
  let log = router.log();
  let loader = ScriptedLoader::new(router);
  let mut acc = MemoryAccumulator::new();
  let logs = LogCapture::new();

  let report = logs
    .run(|| PollCycle::new(&loader, CATALOG).run(&FritzboxConfig::default(), &mut acc))
    .unwrap();

  // both S/A entries try the call; nothing failed is cached
  assert_eq!(log.calls("A"), 2);
  assert_eq!(acc.measurements()[0].fields, fields(&[("z", 3)]));
  assert_eq!(report.skipped.get("action_failed"), Some(&2));

  let errors = logs.lines_at("ERROR");
  assert_eq!(errors.len(), 2, "errors: {errors:?}");
  assert!(errors.iter().all(|line| line.contains(r#"action="A""#)));
  assert!(errors[0].contains("SOAP fault 501"));
}

#[test]
fn unreachable_router_fails_without_reporting() {
  let loader = ScriptedLoader::unreachable();
  let mut acc = MemoryAccumulator::new();

  let err = PollCycle::new(&loader, CATALOG)
    .run(&FritzboxConfig::default(), &mut acc)
    .unwrap_err();

  assert!(acc.is_empty());
  match err {
    FritzpollError::DirectoryLoad { host, port, source } => {
      assert_eq!(host, "fritz.box");
      assert_eq!(port, 49000);
      assert!(source.to_string().contains("connection refused"));
    }
    other => panic!("unexpected error: {other}"),
  }
}

#[test]
fn unset_config_targets_default_router() {
  let loader = ScriptedLoader::new(ScriptedRouter::new());
  let mut acc = MemoryAccumulator::new();
  let config = FritzboxConfig::new("", 0);

  PollCycle::new(&loader, CATALOG).run(&config, &mut acc).unwrap();

  assert_eq!(loader.requests(), vec![("fritz.box".to_string(), 49000)]);
}

#[test]
fn explicit_config_is_used_verbatim() {
  let loader = ScriptedLoader::new(ScriptedRouter::new());
  let mut acc = MemoryAccumulator::new();
  let config = FritzboxConfig::new("192.168.178.1", 49443);

  PollCycle::new(&loader, CATALOG).run(&config, &mut acc).unwrap();

  assert_eq!(loader.requests(), vec![("192.168.178.1".to_string(), 49443)]);
  assert_eq!(acc.measurements()[0].tags, host_tag("192.168.178.1"));
}

#[test]
fn directory_is_reloaded_every_cycle() {
  let router = ScriptedRouter::new().action("S", "A", &[("X", 1), ("Y", 2)]);
  let log = router.log();
  let loader = ScriptedLoader::new(router);
  let mut acc = MemoryAccumulator::new();
  let cycle = PollCycle::new(&loader, CATALOG);

  cycle.run(&FritzboxConfig::default(), &mut acc).unwrap();
  cycle.run(&FritzboxConfig::default(), &mut acc).unwrap();

  assert_eq!(loader.loads(), 2);
  assert_eq!(log.calls("A"), 2);
  assert_eq!(acc.len(), 2);
}

#[test]
fn fritzbox_input_reads_default_catalog() {
  let router = ScriptedRouter::new()
    .action(WAN_COMMON_INTERFACE_CONFIG, "GetTotalPacketsReceived", &[("TotalPacketsReceived", 100)])
    .action(WAN_COMMON_INTERFACE_CONFIG, "GetTotalPacketsSent", &[("TotalPacketsSent", 200)])
    .action(
      WAN_COMMON_INTERFACE_CONFIG,
      "GetAddonInfos",
      &[("TotalBytesReceived", 3000), ("TotalBytesSent", 4000), ("ByteSendRate", 5)],
    )
    .action(WAN_IP_CONNECTION, "GetStatusInfo", &[("Uptime", 600)]);
  let log = router.log();
  let input = Fritzbox::new(FritzboxConfig::default(), ScriptedLoader::new(router));
  let mut acc = MemoryAccumulator::new();

  input.gather(&mut acc).unwrap();

  assert_eq!(log.calls("GetAddonInfos"), 1);
  assert_eq!(log.calls("GetStatusInfo"), 1);
  let m = &acc.measurements()[0];
  assert_eq!(
    m.fields,
    fields(&[
      ("bytes_received", 3000),
      ("bytes_sent", 4000),
      ("packets_received", 100),
      ("packets_sent", 200),
      ("uptime", 600),
    ])
  );
  // GetCommonLinkProperties is absent and ConnectionStatus was not returned
  assert!(!m.fields.contains_key("link_status"));
  assert!(!m.fields.contains_key("connection_status"));
  assert_eq!(DEFAULT_CATALOG.len(), 7);
}
