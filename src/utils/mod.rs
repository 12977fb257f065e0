pub mod bam_reader;
