//! Basic example demonstrating the chatsdk bindings.
//!
//! Run with: RUST_LOG=debug cargo run --example basic

use std::sync::Arc;

use chatsdk::{ChatSdk, MemoryStore, NativeApi};

fn main() -> chatsdk::Result<()> {
    env_logger::init();

    println!("ChatSDK Rust Example - Enhanced with Storage");
    println!("============================================");

    let api = match NativeApi::linked() {
        Ok(api) => api,
        Err(e) => {
            println!("{}; running against the in-process loopback library", e);
            NativeApi::loopback()
        }
    };

    println!("\n--- Standalone API (no storage) ---");
    let messages = ["Hello from standalone API!", "This message won't be stored"];
    for (i, message) in messages.iter().enumerate() {
        println!("Sending standalone message #{}: {}", i + 1, message);
        match api.send_standalone(message) {
            Ok(()) => println!("  sent"),
            Err(e) => println!("  error: {}", e),
        }
    }

    println!("\n--- ChatSdk with a message store ---");
    let store = Arc::new(MemoryStore::new());
    let sdk = ChatSdk::builder()
        .store(store.clone())
        .native_api(api)
        .build()?;
    println!("Store registered under token {}", sdk.token());

    let to_send = [
        ("msg1", "Hello from ChatSdk!"),
        ("msg2", "This message will be stored and can be retrieved"),
        ("msg3", "Nim ❤️ Rust with storage interface working!"),
        ("msg4", "Another stored message with a longer ID"),
    ];
    for (id, message) in to_send {
        println!("Sending message [{}]: {}", id, message);
        match sdk.send_message(id, message) {
            Ok(()) => println!("  sent and stored"),
            Err(e) => println!("  error: {}", e),
        }
    }

    println!("\n--- Retrieving messages ---");
    for id in ["msg1", "msg2", "msg3", "msg4", "nonexistent"] {
        match sdk.get_message(id)? {
            Some(message) => println!("[{}] found: {}", id, message),
            None => println!("[{}] not found", id),
        }
    }

    println!("\n--- All stored messages ---");
    if store.is_empty() {
        println!("  (no messages stored)");
    }
    for (id, message) in store.messages() {
        println!("  [{}]: {}", id, message);
    }

    sdk.close()?;
    println!("\nExample completed successfully!");

    Ok(())
}
