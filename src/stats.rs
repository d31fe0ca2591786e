//! Simulation statistics collection and reporting.
//!
//! Tracks per-run metrics including cycle counts, hazard occurrences,
//! stall cycles, forwarding activity, and host execution time.

use std::time::Instant;

/// Simulation statistics structure tracking all run metrics.
///
/// Collects aggregate counts about pipeline behaviour over a single program
/// run. The controller resets these whenever a new program is started.
#[derive(Debug, Clone)]
pub struct SimStats {
    start_time: Instant,
    pub cycles: u64,
    pub instructions_retired: u64,

    pub raw_hazards: u64,
    pub waw_hazards: u64,

    pub stall_cycles: u64,
    pub forwards_taken: u64,
}

impl Default for SimStats {
    /// Returns the default value.
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            raw_hazards: 0,
            waw_hazards: 0,
            stall_cycles: 0,
            forwards_taken: 0,
        }
    }
}

impl SimStats {
    /// Prints a formatted summary of all simulation statistics.
    ///
    /// Displays cycle and instruction counts, CPI, hazard and forwarding
    /// totals, and host execution time in a human-readable format.
    pub fn print(&self) {
        let duration = self.start_time.elapsed();
        let seconds = duration.as_secs_f64();

        let cyc = if self.cycles == 0 { 1 } else { self.cycles };
        let instr = if self.instructions_retired == 0 {
            1
        } else {
            self.instructions_retired
        };

        let ipc = self.instructions_retired as f64 / cyc as f64;
        let cpi = cyc as f64 / instr as f64;

        println!("\n==========================================================");
        println!("MIPS PIPELINE SIMULATION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {:.4} s", seconds);
        println!("sim_cycles               {}", self.cycles);
        println!("sim_insts                {}", self.instructions_retired);
        println!("sim_ipc                  {:.4}", ipc);
        println!("sim_cpi                  {:.4}", cpi);
        println!("----------------------------------------------------------");
        println!("HAZARDS");
        println!("  hazards.raw            {}", self.raw_hazards);
        println!("  hazards.waw            {}", self.waw_hazards);
        println!(
            "  stalls.data            {} ({:.2}%)",
            self.stall_cycles,
            (self.stall_cycles as f64 / cyc as f64) * 100.0
        );
        println!("  forwards.taken         {}", self.forwards_taken);
        println!("==========================================================");
    }
}
