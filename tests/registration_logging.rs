//! Checks that failed submissions are logged.
//!
//! Kept in its own test binary because it installs a global logger.

use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};

use cei_site::registration::{
    submit_and_notify, Notice, RecordingNotifier, RegistrationClient, RegistrationForm,
    NETWORK_ERROR_MESSAGE,
};

static RECORDS: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if record.target().starts_with("cei_site") {
            RECORDS
                .lock()
                .unwrap()
                .push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

fn init_capture() {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Debug);
}

#[tokio::test]
async fn test_network_failure_is_logged_as_error() {
    init_capture();

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = RegistrationClient::with_base_url(base_url).unwrap();
    let form = RegistrationForm::new("Ana Pérez", "ana@example.com", "555-0100", "hunter22");
    let mut notifier = RecordingNotifier::new();

    let notice = submit_and_notify(&client, &form, &mut notifier).await;
    assert_eq!(notice, Notice::error(NETWORK_ERROR_MESSAGE));

    let records = RECORDS.lock().unwrap();
    assert!(
        records.iter().any(|(level, message)| *level == Level::Error
            && message.contains("Failed to reach registration endpoint")),
        "expected an error record, got {:?}",
        *records
    );
    assert!(
        records.iter().all(|(_, message)| !message.contains("hunter22")),
        "password leaked into logs"
    );
}
