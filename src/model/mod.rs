/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/
/// Token pair and identity provider payloads
pub mod auth;
/// HTTP transport abstraction and its reqwest implementation
pub mod http;
/// Request models for resource calls
pub mod requests;
/// Response classification and the shared envelope
pub mod response;
