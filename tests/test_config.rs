use std::path::PathBuf;
use std::time::Duration;
use uds_http::config::Config;

#[test]
fn test_config_defaults() {
    let cfg = Config::default();
    assert_eq!(cfg.socket_path, PathBuf::from("/var/run/uds-http.sock"));
    assert_eq!(cfg.connect_timeout(), Duration::from_secs(5));
    assert_eq!(cfg.request_timeout(), Duration::from_secs(30));
}

#[test]
fn test_config_from_yaml() {
    let cfg = Config::from_yaml_str(
        "socket_path: /tmp/edge.sock\nconnect_timeout_secs: 1\nrequest_timeout_secs: 10\n",
    )
    .unwrap();

    assert_eq!(cfg.socket_path, PathBuf::from("/tmp/edge.sock"));
    assert_eq!(cfg.connect_timeout(), Duration::from_secs(1));
    assert_eq!(cfg.request_timeout(), Duration::from_secs(10));
}

#[test]
fn test_config_partial_yaml_keeps_defaults() {
    let cfg = Config::from_yaml_str("request_timeout_secs: 3\n").unwrap();

    assert_eq!(cfg.socket_path, Config::default().socket_path);
    assert_eq!(cfg.connect_timeout_secs, 5);
    assert_eq!(cfg.request_timeout_secs, 3);
}

#[test]
fn test_config_invalid_yaml() {
    assert!(Config::from_yaml_str("connect_timeout_secs: soon\n").is_err());
}

#[test]
fn test_config_missing_file() {
    assert!(Config::from_file("/nonexistent/uds-http.yaml").is_err());
}

// The only test in this binary that touches the environment.
#[test]
fn test_config_env_overrides() {
    let path = std::env::temp_dir().join(format!("uds-http-config-{}.yaml", std::process::id()));
    std::fs::write(&path, "socket_path: /tmp/from-file.sock\nconnect_timeout_secs: 2\n").unwrap();

    unsafe {
        std::env::set_var("UDS_HTTP_CONFIG", &path);
        std::env::remove_var("UDS_HTTP_SOCKET");
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.socket_path, PathBuf::from("/tmp/from-file.sock"));
    assert_eq!(cfg.connect_timeout_secs, 2);

    unsafe {
        std::env::set_var("UDS_HTTP_SOCKET", "/tmp/override.sock");
    }
    let cfg = Config::load().unwrap();
    assert_eq!(cfg.socket_path, PathBuf::from("/tmp/override.sock"));
    assert_eq!(cfg.connect_timeout_secs, 2);

    unsafe {
        std::env::remove_var("UDS_HTTP_CONFIG");
        std::env::remove_var("UDS_HTTP_SOCKET");
    }
    std::fs::remove_file(&path).unwrap();
}
