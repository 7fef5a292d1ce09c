pub mod inproc_transport;
