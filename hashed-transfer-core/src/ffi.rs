//! FFI bindings for the hashed transfer core
//!
//! C-compatible entry points for hashing and benchmarking. Strings returned
//! through `FfiResult::data` are owned by Rust and must be released with
//! `hashed_transfer_free_string` or `hashed_transfer_free_result`.
//!
//! Algorithm codes: 0 = SHA-512 (first 32 bytes), 1 = BLAKE3, 2 = SHA512+BLAKE3.
//! Benchmark algorithm masks set bit `1 << code` for each algorithm to run.
//!
//! Error codes: 1 = invalid input, 2 = unknown algorithm, 3 = hashing failed,
//! 4 = benchmark failed, 5 = serialization failed, 15 = string conversion failed.

use libc::c_char;
use std::ffi::{CStr, CString};
use std::ptr;
use crate::core::benchmark::{BenchmarkRunner, BenchmarkSummary};
use crate::core::crypto::hashing::{HashAlgorithmId, HashEngine, HashInput};
use crate::shared::error::TransferError;

const MAX_PAYLOAD_LEN: usize = 1024 * 1024;

const ALGORITHM_CODES: [(i32, HashAlgorithmId); 3] = [
    (0, HashAlgorithmId::Sha512Truncated32),
    (1, HashAlgorithmId::Blake3Full),
    (2, HashAlgorithmId::Combined),
];

/// FFI result wrapper
#[repr(C)]
pub struct FfiResult {
    success: bool,
    data: *mut c_char,
    error_code: i32,
}

impl FfiResult {
    fn success(data: String) -> Self {
        match CString::new(data) {
            Ok(c_string) => Self {
                success: true,
                data: c_string.into_raw(),
                error_code: 0,
            },
            Err(_) => Self {
                success: false,
                data: ptr::null_mut(),
                error_code: 15, // String conversion failed
            },
        }
    }

    fn error(error_code: i32) -> Self {
        Self {
            success: false,
            data: ptr::null_mut(),
            error_code,
        }
    }
}

/// Read a payload C string. Empty payloads are allowed.
fn read_payload(input: *const c_char) -> Result<String, TransferError> {
    if input.is_null() {
        return Err(TransferError::invalid_input("Null input pointer"));
    }

    let input_str = unsafe {
        match CStr::from_ptr(input).to_str() {
            Ok(s) => s,
            Err(_) => return Err(TransferError::invalid_input("Invalid UTF-8 input")),
        }
    };

    if input_str.len() > MAX_PAYLOAD_LEN {
        return Err(TransferError::invalid_input("Input too long"));
    }

    Ok(input_str.to_string())
}

fn algorithm_from_code(code: i32) -> Result<HashAlgorithmId, TransferError> {
    ALGORITHM_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, algorithm)| *algorithm)
        .ok_or_else(|| TransferError::invalid_input(format!("Unknown algorithm code {}", code)))
}

/// Algorithms selected by a bit mask; empty masks and unknown bits are rejected
fn algorithms_from_mask(mask: u32) -> Result<Vec<HashAlgorithmId>, TransferError> {
    let known = ALGORITHM_CODES.iter().fold(0u32, |acc, (code, _)| acc | (1u32 << *code));
    if mask == 0 || mask & !known != 0 {
        return Err(TransferError::invalid_input(format!("Invalid algorithm mask {:#b}", mask)));
    }
    Ok(ALGORITHM_CODES
        .iter()
        .filter(|(code, _)| mask & (1u32 << *code) != 0)
        .map(|(_, algorithm)| *algorithm)
        .collect())
}

/// Hash a UTF-8 payload and return the `0x`-prefixed hex digest
#[no_mangle]
pub extern "C" fn hashed_transfer_hash_hex(payload: *const c_char, algorithm: i32) -> FfiResult {
    let payload = match read_payload(payload) {
        Ok(s) => s,
        Err(_) => return FfiResult::error(1), // Invalid input
    };

    let algorithm = match algorithm_from_code(algorithm) {
        Ok(a) => a,
        Err(_) => return FfiResult::error(2), // Unknown algorithm
    };

    match HashEngine::new().hash_to_hex(algorithm, &HashInput::Text(payload)) {
        Ok(hex) => FfiResult::success(hex),
        Err(_) => FfiResult::error(3), // Hashing failed
    }
}

/// Benchmark the algorithms in `algorithm_mask` over a payload; returns the summaries as JSON
#[no_mangle]
pub extern "C" fn hashed_transfer_benchmark_json(
    payload: *const c_char,
    algorithm_mask: u32,
    trial_count: u32,
    warmup_count: u32,
) -> FfiResult {
    let payload = match read_payload(payload) {
        Ok(s) => s,
        Err(_) => return FfiResult::error(1), // Invalid input
    };

    let algorithms = match algorithms_from_mask(algorithm_mask) {
        Ok(a) => a,
        Err(_) => return FfiResult::error(2), // Unknown algorithm
    };

    let summaries = match BenchmarkRunner::new().benchmark(
        &algorithms,
        &HashInput::Text(payload),
        trial_count as usize,
        warmup_count as usize,
    ) {
        Ok(s) => s,
        Err(_) => return FfiResult::error(4), // Benchmark failed
    };

    let summaries: Vec<BenchmarkSummary> = summaries.into_values().collect();
    match serde_json::to_string(&summaries) {
        Ok(json) => FfiResult::success(json),
        Err(_) => FfiResult::error(5), // Serialization failed
    }
}

/// Free a C string returned by this library
#[no_mangle]
pub extern "C" fn hashed_transfer_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}

/// Free the data held by an FfiResult
#[no_mangle]
pub extern "C" fn hashed_transfer_free_result(result: *mut FfiResult) {
    if !result.is_null() {
        unsafe {
            let result_ref = &mut *result;
            if !result_ref.data.is_null() {
                let _ = CString::from_raw(result_ref.data);
                result_ref.data = ptr::null_mut();
            }
        }
    }
}
