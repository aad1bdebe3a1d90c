//! In-process mock agent speaking the full wire contract
//!
//! Backs the executor integration tests with an in-memory remote
//! filesystem and package set, real TCP on both channels, and the
//! staging semantics the protocol demands: chunks accumulate against a
//! pending upload and only land in the filesystem map after a complete,
//! verified end-of-upload marker.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::net::{TcpListener, TcpStream};

use hostwright_client::HostAddress;
use hostwright_proto::{
    AgentHello, ClientHello, CpuFacts, ExecOutcome, FileOwner, FsMount, NetInterface, OsFamily,
    OsInfo, PROTOCOL_VERSION, Payload, RemoteFailure, RemoteFailureKind, Request, Response,
    TelemetrySnapshot, TransferFrame, TransferReceipt, read_frame, write_frame,
};

type RemoteFs = Arc<Mutex<HashMap<String, Vec<u8>>>>;
type InstalledSet = Arc<Mutex<HashSet<String>>>;
type ChunkLog = Arc<Mutex<Vec<usize>>>;

#[derive(Clone)]
pub struct AgentOptions {
    pub os: OsFamily,
    /// Echoed in every RunCommand outcome so tests can tell agents
    /// apart.
    pub tag: String,
    /// Refuse the backup rename at FileUploadBegin.
    pub fail_backup: bool,
    /// Drop the transfer connection after this many chunks.
    pub drop_transfer_after: Option<u64>,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            os: OsFamily::Debian,
            tag: "agent".to_string(),
            fail_backup: false,
            drop_transfer_after: None,
        }
    }
}

pub struct MockAgent {
    pub addr: HostAddress,
    files: RemoteFs,
    installed: InstalledSet,
    chunk_log: ChunkLog,
}

impl MockAgent {
    pub fn seed_file(&self, path: &str, bytes: &[u8]) {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), bytes.to_vec());
    }

    pub fn file(&self, path: &str) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(path).cloned()
    }

    pub fn seed_package(&self, name: &str) {
        self.installed.lock().unwrap().insert(name.to_string());
    }

    pub fn package_installed(&self, name: &str) -> bool {
        self.installed.lock().unwrap().contains(name)
    }

    /// Sizes of every chunk received so far, in arrival order.
    pub fn chunk_sizes(&self) -> Vec<usize> {
        self.chunk_log.lock().unwrap().clone()
    }
}

struct PendingUpload {
    path: String,
    chunks: BTreeMap<u64, Vec<u8>>,
}

type Uploads = Arc<Mutex<HashMap<u64, PendingUpload>>>;

pub async fn spawn(options: AgentOptions) -> MockAgent {
    let control = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let transfer = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = HostAddress::new(
        "127.0.0.1",
        control.local_addr().unwrap().port(),
        transfer.local_addr().unwrap().port(),
    );

    let files: RemoteFs = Arc::new(Mutex::new(HashMap::new()));
    let installed: InstalledSet = Arc::new(Mutex::new(HashSet::new()));
    let chunk_log: ChunkLog = Arc::new(Mutex::new(Vec::new()));
    let uploads: Uploads = Arc::new(Mutex::new(HashMap::new()));
    let next_upload = Arc::new(AtomicU64::new(1));

    {
        let options = options.clone();
        let files = files.clone();
        let installed = installed.clone();
        let uploads = uploads.clone();
        tokio::spawn(async move {
            loop {
                let Ok((sock, _)) = control.accept().await else {
                    return;
                };
                tokio::spawn(handle_control(
                    sock,
                    options.clone(),
                    files.clone(),
                    installed.clone(),
                    uploads.clone(),
                    next_upload.clone(),
                ));
            }
        });
    }

    {
        let options = options.clone();
        let files = files.clone();
        let uploads = uploads.clone();
        let chunk_log = chunk_log.clone();
        tokio::spawn(async move {
            loop {
                let Ok((sock, _)) = transfer.accept().await else {
                    return;
                };
                tokio::spawn(handle_transfer(
                    sock,
                    options.clone(),
                    files.clone(),
                    uploads.clone(),
                    chunk_log.clone(),
                ));
            }
        });
    }

    MockAgent {
        addr,
        files,
        installed,
        chunk_log,
    }
}

async fn handle_control(
    mut sock: TcpStream,
    options: AgentOptions,
    files: RemoteFs,
    installed: InstalledSet,
    uploads: Uploads,
    next_upload: Arc<AtomicU64>,
) {
    let Ok(_hello) = read_frame::<_, ClientHello>(&mut sock).await else {
        return;
    };
    let agent_hello = AgentHello {
        version: PROTOCOL_VERSION,
        os: options.os,
    };
    if write_frame(&mut sock, &agent_hello).await.is_err() {
        return;
    }

    loop {
        let Ok(request) = read_frame::<_, Request>(&mut sock).await else {
            return;
        };
        let response = respond(
            request,
            &options,
            &files,
            &installed,
            &uploads,
            &next_upload,
        );
        if write_frame(&mut sock, &response).await.is_err() {
            return;
        }
    }
}

fn respond(
    request: Request,
    options: &AgentOptions,
    files: &RemoteFs,
    installed: &InstalledSet,
    uploads: &Uploads,
    next_upload: &AtomicU64,
) -> Response {
    let ok = |payload| Response::Ok { payload };

    match request {
        Request::RunCommand { cmd } => ok(Payload::Exec(ExecOutcome {
            exit_code: 0,
            stdout: format!("{}:{}", options.tag, cmd).into_bytes(),
            stderr: Vec::new(),
        })),

        Request::FileExists { path } => ok(Payload::Bool(files.lock().unwrap().contains_key(&path))),
        Request::FileUploadBegin {
            path,
            backup_suffix,
            ..
        } => {
            let mut files = files.lock().unwrap();
            if let Some(suffix) = backup_suffix
                && files.contains_key(&path)
            {
                if options.fail_backup {
                    return Response::Error {
                        detail: RemoteFailure {
                            kind: RemoteFailureKind::BackupFailed,
                            message: format!("cannot rename {path} to {path}{suffix}"),
                        },
                    };
                }
                let old = files.remove(&path).unwrap();
                files.insert(format!("{path}{suffix}"), old);
            }

            let id = next_upload.fetch_add(1, Ordering::SeqCst);
            uploads.lock().unwrap().insert(
                id,
                PendingUpload {
                    path,
                    chunks: BTreeMap::new(),
                },
            );
            ok(Payload::UploadReady { upload: id })
        }
        Request::FileDelete { path } => {
            files.lock().unwrap().remove(&path);
            ok(Payload::Unit)
        }
        Request::FileMove { path, new_path } => {
            let mut files = files.lock().unwrap();
            if let Some(bytes) = files.remove(&path) {
                files.insert(new_path, bytes);
            }
            ok(Payload::Unit)
        }
        Request::FileCopy { path, new_path } => {
            let mut files = files.lock().unwrap();
            if let Some(bytes) = files.get(&path).cloned() {
                files.insert(new_path, bytes);
            }
            ok(Payload::Unit)
        }

        Request::DirExists { .. } => ok(Payload::Bool(true)),
        Request::DirCreate { .. }
        | Request::DirDelete { .. }
        | Request::DirMove { .. }
        | Request::DirSetOwner { .. }
        | Request::DirSetMode { .. }
        | Request::FileSetOwner { .. }
        | Request::FileSetMode { .. } => ok(Payload::Unit),
        Request::DirGetOwner { .. } | Request::FileGetOwner { .. } => {
            ok(Payload::Owner(FileOwner {
                user: "root".to_string(),
                group: "root".to_string(),
            }))
        }
        Request::DirGetMode { .. } | Request::FileGetMode { .. } => ok(Payload::Mode(0o755)),

        Request::PackageIsInstalled { name, .. } => {
            ok(Payload::Bool(installed.lock().unwrap().contains(&name)))
        }
        Request::PackageInstall { name, .. } => {
            let mut installed = installed.lock().unwrap();
            if installed.contains(&name) {
                ok(Payload::NoOp)
            } else {
                installed.insert(name);
                ok(Payload::Exec(ExecOutcome {
                    exit_code: 0,
                    stdout: b"installed".to_vec(),
                    stderr: Vec::new(),
                }))
            }
        }
        Request::PackageUninstall { name, .. } => {
            let mut installed = installed.lock().unwrap();
            if installed.remove(&name) {
                ok(Payload::Exec(ExecOutcome {
                    exit_code: 0,
                    stdout: b"removed".to_vec(),
                    stderr: Vec::new(),
                }))
            } else {
                ok(Payload::NoOp)
            }
        }

        Request::ServiceAction { name, action } => ok(Payload::Exec(ExecOutcome {
            exit_code: 0,
            stdout: format!("{name} {action}").into_bytes(),
            stderr: Vec::new(),
        })),

        Request::TelemetryLoad => ok(Payload::Snapshot(sample_snapshot(options.os))),
    }
}

async fn handle_transfer(
    mut sock: TcpStream,
    options: AgentOptions,
    files: RemoteFs,
    uploads: Uploads,
    chunk_log: ChunkLog,
) {
    let mut seen = 0u64;

    loop {
        let Ok(frame) = read_frame::<_, TransferFrame>(&mut sock).await else {
            return;
        };

        match frame {
            TransferFrame::Chunk {
                upload,
                index,
                data,
            } => {
                seen += 1;
                if let Some(limit) = options.drop_transfer_after
                    && seen >= limit
                {
                    // Connection dies mid-stream; the pending upload is
                    // never promoted into the filesystem.
                    return;
                }
                chunk_log.lock().unwrap().push(data.len());
                if let Some(pending) = uploads.lock().unwrap().get_mut(&upload) {
                    pending.chunks.insert(index, data);
                }
            }
            TransferFrame::End {
                upload,
                total_chunks,
            } => {
                let receipt = {
                    let pending = uploads.lock().unwrap().remove(&upload);
                    match pending {
                        Some(pending) if complete(&pending.chunks, total_chunks) => {
                            let bytes: Vec<u8> =
                                pending.chunks.into_values().flatten().collect();
                            files.lock().unwrap().insert(pending.path, bytes);
                            TransferReceipt::Ok { upload }
                        }
                        _ => TransferReceipt::Error {
                            upload,
                            detail: RemoteFailure {
                                kind: RemoteFailureKind::Other,
                                message: "incomplete upload".to_string(),
                            },
                        },
                    }
                };
                if write_frame(&mut sock, &receipt).await.is_err() {
                    return;
                }
            }
        }
    }
}

fn complete(chunks: &BTreeMap<u64, Vec<u8>>, total_chunks: u64) -> bool {
    chunks.len() as u64 == total_chunks
        && chunks.keys().copied().eq(0..total_chunks)
}

fn sample_snapshot(os: OsFamily) -> TelemetrySnapshot {
    TelemetrySnapshot {
        hostname: "mock-host".to_string(),
        os: OsInfo {
            family: os,
            platform: "ubuntu".to_string(),
            version: "24.04".to_string(),
            arch: "x86_64".to_string(),
        },
        cpu: CpuFacts {
            vendor: "GenuineIntel".to_string(),
            brand: "Intel(R) Xeon(R)".to_string(),
            cores: 8,
        },
        memory_bytes: 16 * 1024 * 1024 * 1024,
        fs: vec![FsMount {
            filesystem: "/dev/sda1".to_string(),
            mountpoint: "/".to_string(),
            capacity_bytes: 100 * 1024 * 1024 * 1024,
            used_bytes: 40 * 1024 * 1024 * 1024,
            available_bytes: 60 * 1024 * 1024 * 1024,
        }],
        net: vec![NetInterface {
            name: "eth0".to_string(),
            mac: Some("52:54:00:12:34:56".to_string()),
            ipv4: vec!["10.0.0.5".to_string()],
            ipv6: Vec::new(),
        }],
        collected_at: Utc::now(),
    }
}
