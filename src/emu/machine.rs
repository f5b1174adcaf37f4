//! Machine - grid wiring, stub synthesis, the tick loop and the run façade
//!
//! The machine owns every node in one arena (compute grid first, stream
//! stubs appended behind it) and an active list of the nodes worth ticking.
//! One tick steps each active node once, in insertion order: input stubs,
//! output stubs, then compute nodes with non-empty programs in grid order.
//! That order is observable — port arbitration depends on who moves first
//! within a round — so it is fixed here and nowhere else.
//!
//! The run ends once every active node has reported itself blocked for
//! [`QUIESCENT_TICKS`] consecutive ticks. Output streams live on the
//! machine, never in process globals, so concurrent runs cannot alias.

use tracing::debug;

use crate::error::{GridasmError, Result};

use super::instruction::{Dir, Instruction, Op, Operand};
use super::node::{saturate, Node, NodeId, Pending};
use super::parser::parse_program;
use super::stream::{NodeCode, Stream, StreamType};
use super::{GRID_HEIGHT, GRID_WIDTH, NODE_COUNT, QUIESCENT_TICKS};

/// Outcome of the read half of an instruction
enum Read {
    Value(i16),
    Blocked,
}

/// The full machine for one run
pub struct Machine {
    nodes: Vec<Node>,
    /// Node ids to tick, in insertion order
    active: Vec<NodeId>,
    /// Output streams being populated by RES, scoped to this run
    outputs: Vec<Stream>,
}

/// Execute `node_code` against `streams` and return the populated OUT
/// streams. This is the single entry point of the emulator core.
pub fn run(streams: &[Stream], node_code: &[NodeCode]) -> Result<Vec<Stream>> {
    debug!(
        streams = streams.len(),
        programs = node_code.len(),
        "starting run"
    );

    let mut machine = Machine::new();
    machine.load_streams(streams)?;
    machine.load_code(node_code)?;
    machine.run_to_quiescence()?;
    Ok(machine.into_outputs())
}

impl Machine {
    /// A wired 4×3 compute grid with no programs loaded
    pub fn new() -> Self {
        let mut nodes: Vec<Node> = (0..NODE_COUNT).map(|i| Node::new(i as u8)).collect();

        for i in 0..NODE_COUNT {
            let row = i / GRID_WIDTH;
            let col = i % GRID_WIDTH;
            if row + 1 < GRID_HEIGHT {
                nodes[i].set_port(Dir::Down, i + GRID_WIDTH);
            }
            if row > 0 {
                nodes[i].set_port(Dir::Up, i - GRID_WIDTH);
            }
            if col + 1 < GRID_WIDTH {
                nodes[i].set_port(Dir::Right, i + 1);
            }
            if col > 0 {
                nodes[i].set_port(Dir::Left, i - 1);
            }
        }

        Self {
            nodes,
            active: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Synthesise one stub node per stream and put it on the active list
    pub fn load_streams(&mut self, streams: &[Stream]) -> Result<()> {
        for stream in streams {
            if usize::from(stream.index) >= NODE_COUNT {
                return Err(GridasmError::Shape(format!(
                    "stream index {} is outside the grid",
                    stream.index
                )));
            }
            let id = match stream.stream_type {
                StreamType::In => self.create_input_stub(stream),
                StreamType::Out => self.create_output_stub(stream),
            };
            self.active.push(id);
        }
        Ok(())
    }

    /// Parse the twelve node programs and activate the non-empty ones
    pub fn load_code(&mut self, node_code: &[NodeCode]) -> Result<()> {
        if node_code.len() != NODE_COUNT {
            return Err(GridasmError::Shape(format!(
                "expected {} node programs, got {}",
                NODE_COUNT,
                node_code.len()
            )));
        }

        for (id, code) in node_code.iter().enumerate() {
            self.nodes[id].instructions = parse_program(&code.code)?;
            if !self.nodes[id].instructions.is_empty() {
                self.active.push(id);
            }
        }
        Ok(())
    }

    /// Tick until the machine has been fully blocked for five straight rounds
    pub fn run_to_quiescence(&mut self) -> Result<()> {
        let mut quiet = 0;
        let mut ticks: u64 = 0;
        while quiet < QUIESCENT_TICKS {
            if self.tick()? {
                quiet += 1;
            } else {
                quiet = 0;
            }
            ticks += 1;
        }
        debug!(ticks, "machine quiescent");
        Ok(())
    }

    /// Step every active node once. Returns true when no node made progress.
    pub fn tick(&mut self) -> Result<bool> {
        let mut all_blocked = true;
        for i in 0..self.active.len() {
            let id = self.active[i];
            self.step(id)?;
            all_blocked = all_blocked && self.nodes[id].blocked;
        }
        Ok(all_blocked)
    }

    /// The populated output streams, consuming the machine
    pub fn into_outputs(self) -> Vec<Stream> {
        self.outputs
    }

    fn create_input_stub(&mut self, stream: &Stream) -> NodeId {
        let id = self.nodes.len();
        let below = usize::from(stream.index);

        let mut stub = Node::new(stream.index);
        stub.set_port(Dir::Down, below);
        self.nodes[below].set_port(Dir::Up, id);

        for &value in &stream.values {
            stub.instructions
                .push(Instruction::mov(Operand::Imm(value), Dir::Down));
        }
        // Self-loop once drained; JRO holds the blocked flag, so a spent
        // stub still counts toward quiescence
        stub.instructions
            .push(Instruction::unary(Op::Jro, Operand::Imm(0)));

        self.nodes.push(stub);
        id
    }

    fn create_output_stub(&mut self, stream: &Stream) -> NodeId {
        let id = self.nodes.len();
        let above = usize::from(stream.index);

        let mut stub = Node::new(stream.index);
        stub.set_port(Dir::Up, above);
        self.nodes[above].set_port(Dir::Down, id);

        stub.instructions
            .push(Instruction::mov(Operand::Addr(Dir::Up), Dir::Acc));
        stub.instructions.push(Instruction::nullary(Op::Res));

        self.outputs.push(Stream::output(stream.index));
        self.nodes.push(stub);
        id
    }

    /// Execute one instruction on `id`. The blocked flag starts true and is
    /// cleared only by the epilogue; jumps return early and therefore count
    /// as blocked, which is what lets jump self-loops quiesce.
    fn step(&mut self, id: NodeId) -> Result<()> {
        self.nodes[id].blocked = true;

        let node = &mut self.nodes[id];
        if node.cursor >= node.instructions.len() {
            node.cursor = 0;
        }
        let ins = node.instructions[node.cursor];

        match ins.op {
            Op::Mov => {
                if self.nodes[id].writing.is_some() {
                    // Write half still awaiting its consumer
                    return Ok(());
                }
                let value = match self.read(id, ins.src) {
                    Read::Blocked => return Ok(()),
                    Read::Value(value) => value,
                };
                if self.write(id, ins.dst, value)? {
                    return Ok(());
                }
            }
            Op::Add => {
                let value = match self.read(id, ins.src) {
                    Read::Blocked => return Ok(()),
                    Read::Value(value) => value,
                };
                let node = &mut self.nodes[id];
                node.acc = saturate(i32::from(node.acc) + i32::from(value));
            }
            Op::Sub => {
                let value = match self.read(id, ins.src) {
                    Read::Blocked => return Ok(()),
                    Read::Value(value) => value,
                };
                let node = &mut self.nodes[id];
                node.acc = saturate(i32::from(node.acc) - i32::from(value));
            }
            Op::Jmp => {
                self.nodes[id].set_cursor(i32::from(ins.src.number()));
                return Ok(());
            }
            Op::Jro => {
                let node = &mut self.nodes[id];
                node.set_cursor(node.cursor as i32 + i32::from(ins.src.number()));
                return Ok(());
            }
            Op::Jez => {
                if self.nodes[id].acc == 0 {
                    self.nodes[id].set_cursor(i32::from(ins.src.number()));
                    return Ok(());
                }
            }
            Op::Jnz => {
                if self.nodes[id].acc != 0 {
                    self.nodes[id].set_cursor(i32::from(ins.src.number()));
                    return Ok(());
                }
            }
            Op::Jgz => {
                if self.nodes[id].acc > 0 {
                    self.nodes[id].set_cursor(i32::from(ins.src.number()));
                    return Ok(());
                }
            }
            Op::Jlz => {
                if self.nodes[id].acc < 0 {
                    self.nodes[id].set_cursor(i32::from(ins.src.number()));
                    return Ok(());
                }
            }
            Op::Sav => {
                let node = &mut self.nodes[id];
                node.bak = node.acc;
            }
            Op::Swp => {
                let node = &mut self.nodes[id];
                std::mem::swap(&mut node.acc, &mut node.bak);
            }
            Op::Neg => {
                let node = &mut self.nodes[id];
                node.acc = -node.acc;
            }
            Op::Nop => {}
            Op::Res => {
                let (index, value) = {
                    let node = &self.nodes[id];
                    (node.index, node.acc)
                };
                self.push_output(index, value);
            }
        }

        let node = &mut self.nodes[id];
        node.blocked = false;
        node.advance();
        Ok(())
    }

    /// Resolve the read half of an instruction. Immediates and register
    /// sources never block; port sources rendezvous with a writing peer.
    fn read(&mut self, id: NodeId, src: Operand) -> Read {
        let dir = match src {
            Operand::Imm(value) => return Read::Value(value),
            Operand::Addr(dir) => dir,
        };

        match dir {
            Dir::Nil => Read::Value(0),
            Dir::Acc => Read::Value(self.nodes[id].acc),
            Dir::Up | Dir::Right | Dir::Down | Dir::Left => {
                match self.nodes[id].port(dir) {
                    Some(peer) => match self.try_take(peer, id) {
                        Some(value) => Read::Value(value),
                        None => Read::Blocked,
                    },
                    None => Read::Blocked,
                }
            }
            Dir::Any => {
                // Reader-side arbitration order
                for dir in [Dir::Left, Dir::Right, Dir::Up, Dir::Down] {
                    if let Some(peer) = self.nodes[id].port(dir) {
                        if let Some(value) = self.try_take(peer, id) {
                            self.nodes[id].last = Some(peer);
                            return Read::Value(value);
                        }
                    }
                }
                Read::Blocked
            }
            Dir::Last => match self.nodes[id].last {
                // Never assigned: reads as a zero constant
                None => Read::Value(0),
                Some(peer) => match self.try_take(peer, id) {
                    Some(value) => Read::Value(value),
                    None => Read::Blocked,
                },
            },
        }
    }

    /// Consume `writer`'s pending value if it is addressed at `reader`.
    /// The transfer also releases the writer: its MOV completes and its
    /// cursor moves on.
    fn try_take(&mut self, writer: NodeId, reader: NodeId) -> Option<i16> {
        if !self.nodes[writer].offers_to(reader) {
            return None;
        }
        let pending = self.nodes[writer].writing.take()?;
        self.nodes[writer].advance();
        Some(pending.value)
    }

    /// Resolve the write half of a MOV. Returns true when the instruction
    /// stays in flight: every port write holds the MOV until a reader
    /// consumes the value, and a port with no neighbour holds it forever.
    fn write(&mut self, id: NodeId, dst: Operand, value: i16) -> Result<bool> {
        let dir = match dst {
            Operand::Addr(dir) => dir,
            Operand::Imm(_) => {
                return Err(GridasmError::Runtime(
                    "write destination is not an address".to_string(),
                ));
            }
        };

        match dir {
            Dir::Acc => {
                self.nodes[id].set_acc(value);
                Ok(false)
            }
            Dir::Nil => Err(GridasmError::Runtime("write to NIL".to_string())),
            Dir::Up | Dir::Right | Dir::Down | Dir::Left => {
                if let Some(peer) = self.nodes[id].port(dir) {
                    self.nodes[id].writing = Some(Pending { peer, value });
                }
                Ok(true)
            }
            Dir::Any => {
                if let Some(peer) = self.any_write_candidate(id) {
                    self.nodes[id].writing = Some(Pending { peer, value });
                    self.nodes[id].last = Some(peer);
                }
                Ok(true)
            }
            Dir::Last => {
                if let Some(peer) = self.nodes[id].last {
                    self.nodes[id].writing = Some(Pending { peer, value });
                }
                Ok(true)
            }
        }
    }

    /// Writer-side ANY arbitration: scan UP, LEFT, RIGHT, DOWN and pick the
    /// first neighbour whose next instruction is a MOV reading this node,
    /// either through a geographic port or through ANY. Note the order is
    /// not the reader-side order.
    fn any_write_candidate(&self, id: NodeId) -> Option<NodeId> {
        for dir in [Dir::Up, Dir::Left, Dir::Right, Dir::Down] {
            let Some(peer) = self.nodes[id].port(dir) else {
                continue;
            };
            let Some(ins) = self.nodes[peer].next_instruction() else {
                continue;
            };
            if ins.op != Op::Mov {
                continue;
            }
            let Operand::Addr(src) = ins.src else {
                continue;
            };
            if src == Dir::Any || self.nodes[peer].port(src) == Some(id) {
                return Some(peer);
            }
        }
        None
    }

    /// Append a RES emission to the matching output stream, if registered
    fn push_output(&mut self, index: u8, value: i16) {
        if let Some(stream) = self.outputs.iter_mut().find(|s| s.index == index) {
            stream.values.push(value);
        }
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emu::MAX_ACC;

    fn node_code(programs: &[(usize, &[&str])]) -> Vec<NodeCode> {
        let mut code: Vec<NodeCode> = (0..NODE_COUNT)
            .map(|i| NodeCode {
                index: i as u8,
                code: Vec::new(),
            })
            .collect();
        for (index, lines) in programs {
            code[*index].code = lines.iter().map(|s| s.to_string()).collect();
        }
        code
    }

    fn in_stream(index: u8, values: &[i16]) -> Stream {
        Stream {
            index,
            name: None,
            stream_type: StreamType::In,
            values: values.to_vec(),
            min_value: 0,
            max_value: 0,
        }
    }

    fn out_stream(index: u8) -> Stream {
        Stream {
            index,
            name: None,
            stream_type: StreamType::Out,
            values: Vec::new(),
            min_value: 0,
            max_value: 0,
        }
    }

    #[test]
    fn test_grid_wiring() {
        let machine = Machine::new();

        // Corners
        assert_eq!(machine.nodes[0].port(Dir::Up), None);
        assert_eq!(machine.nodes[0].port(Dir::Left), None);
        assert_eq!(machine.nodes[0].port(Dir::Right), Some(1));
        assert_eq!(machine.nodes[0].port(Dir::Down), Some(4));

        assert_eq!(machine.nodes[11].port(Dir::Down), None);
        assert_eq!(machine.nodes[11].port(Dir::Right), None);
        assert_eq!(machine.nodes[11].port(Dir::Up), Some(7));
        assert_eq!(machine.nodes[11].port(Dir::Left), Some(10));

        // Interior
        assert_eq!(machine.nodes[5].port(Dir::Up), Some(1));
        assert_eq!(machine.nodes[5].port(Dir::Right), Some(6));
        assert_eq!(machine.nodes[5].port(Dir::Down), Some(9));
        assert_eq!(machine.nodes[5].port(Dir::Left), Some(4));
    }

    #[test]
    fn test_stub_wiring() {
        let mut machine = Machine::new();
        machine
            .load_streams(&[in_stream(0, &[1]), out_stream(8)])
            .unwrap();

        let input = NODE_COUNT;
        let output = NODE_COUNT + 1;
        assert_eq!(machine.nodes[0].port(Dir::Up), Some(input));
        assert_eq!(machine.nodes[input].port(Dir::Down), Some(0));
        assert_eq!(machine.nodes[8].port(Dir::Down), Some(output));
        assert_eq!(machine.nodes[output].port(Dir::Up), Some(8));

        // Two MOVs plus the trailing self-loop
        assert_eq!(machine.nodes[input].instructions.len(), 2);
        assert_eq!(machine.nodes[output].instructions.len(), 2);
        assert_eq!(machine.active, vec![input, output]);
    }

    #[test]
    fn test_pass_through() {
        let out = run(
            &[in_stream(0, &[1, 2, 3]), out_stream(8)],
            &node_code(&[
                (0, &["MOV UP, DOWN"]),
                (4, &["MOV UP, DOWN"]),
                (8, &["MOV UP, DOWN"]),
            ]),
        )
        .unwrap();

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].index, 8);
        assert_eq!(out[0].values, vec![1, 2, 3]);
    }

    #[test]
    fn test_accumulator_sum() {
        let out = run(
            &[in_stream(0, &[5, 7]), out_stream(8)],
            &node_code(&[
                (0, &["MOV UP, ACC", "ADD UP", "MOV ACC, DOWN"]),
                (4, &["MOV UP, DOWN"]),
                (8, &["MOV UP, DOWN"]),
            ]),
        )
        .unwrap();

        assert_eq!(out[0].values, vec![12]);
    }

    #[test]
    fn test_add_saturates() {
        let out = run(
            &[in_stream(0, &[500, 500, 500]), out_stream(8)],
            &node_code(&[
                (0, &["MOV UP, ACC", "ADD UP", "ADD UP", "MOV ACC, DOWN"]),
                (4, &["MOV UP, DOWN"]),
                (8, &["MOV UP, DOWN"]),
            ]),
        )
        .unwrap();

        assert_eq!(out[0].values, vec![MAX_ACC]);
    }

    #[test]
    fn test_sub_saturates() {
        let out = run(
            &[in_stream(0, &[500, 500, 500]), out_stream(8)],
            &node_code(&[
                (0, &["MOV UP, ACC", "NEG", "SUB UP", "SUB UP", "MOV ACC, DOWN"]),
                (4, &["MOV UP, DOWN"]),
                (8, &["MOV UP, DOWN"]),
            ]),
        )
        .unwrap();

        assert_eq!(out[0].values, vec![-MAX_ACC]);
    }

    #[test]
    fn test_conditional_emit() {
        let out = run(
            &[in_stream(0, &[0, 3, -2]), out_stream(8)],
            &node_code(&[
                (
                    0,
                    &[
                        "START: MOV UP, ACC",
                        "JEZ SKIP",
                        "JLZ SKIP",
                        "MOV ACC, DOWN",
                        "SKIP: JMP START",
                    ],
                ),
                (4, &["MOV UP, DOWN"]),
                (8, &["MOV UP, DOWN"]),
            ]),
        )
        .unwrap();

        assert_eq!(out[0].values, vec![3]);
    }

    #[test]
    fn test_sav_swp_neg() {
        let out = run(
            &[in_stream(0, &[7]), out_stream(8)],
            &node_code(&[
                // BAK keeps the original while ACC is negated; SWP brings
                // it back, so the stream sees -7 then 7
                (
                    0,
                    &["MOV UP, ACC", "SAV", "NEG", "MOV ACC, DOWN", "SWP", "MOV ACC, DOWN"],
                ),
                (4, &["MOV UP, DOWN"]),
                (8, &["MOV UP, DOWN"]),
            ]),
        )
        .unwrap();

        assert_eq!(out[0].values, vec![-7, 7]);
    }

    #[test]
    fn test_jro_relative_jump() {
        // JRO 2 skips the NEG, so values pass through unchanged
        let out = run(
            &[in_stream(0, &[4, 5]), out_stream(8)],
            &node_code(&[
                (0, &["MOV UP, ACC", "JRO 2", "NEG", "MOV ACC, DOWN", "JMP 0"]),
                (4, &["MOV UP, DOWN"]),
                (8, &["MOV UP, DOWN"]),
            ]),
        )
        .unwrap();

        assert_eq!(out[0].values, vec![4, 5]);
    }

    #[test]
    fn test_jnz_taken_branch_jumps() {
        // JNZ must land exactly on EMIT, not one past it
        let out = run(
            &[in_stream(0, &[6]), out_stream(8)],
            &node_code(&[
                (
                    0,
                    &["MOV UP, ACC", "JNZ EMIT", "NEG", "EMIT: MOV ACC, DOWN", "JMP 0"],
                ),
                (4, &["MOV UP, DOWN"]),
                (8, &["MOV UP, DOWN"]),
            ]),
        )
        .unwrap();

        assert_eq!(out[0].values, vec![6]);
    }

    #[test]
    fn test_res_from_compute_node() {
        // A compute node at an output index can feed the stream directly
        let out = run(
            &[in_stream(0, &[9]), out_stream(8)],
            &node_code(&[
                (0, &["MOV UP, DOWN"]),
                (4, &["MOV UP, DOWN"]),
                (8, &["MOV UP, ACC", "RES", "RES"]),
            ]),
        )
        .unwrap();

        // Node 8 emits twice itself; its downstream stub emits a third time
        // only if it ever receives a value, which it does not here
        assert_eq!(out[0].values, vec![9, 9]);
    }

    #[test]
    fn test_any_arbitration_order() {
        // Four writers surround node 5; the reader must drain them in the
        // reader-side search order LEFT, RIGHT, UP, DOWN regardless of who
        // started writing first.
        let mut machine = Machine::new();
        machine
            .load_code(&node_code(&[
                (1, &["MOV 100, DOWN", "JRO 0"]),
                (4, &["MOV 200, RIGHT", "JRO 0"]),
                (5, &["MOV ANY, ACC", "RES"]),
                (6, &["MOV 300, LEFT", "JRO 0"]),
                (9, &["MOV 400, UP", "JRO 0"]),
            ]))
            .unwrap();
        machine.outputs.push(Stream::output(5));

        machine.run_to_quiescence().unwrap();

        assert_eq!(machine.outputs[0].values, vec![200, 300, 100, 400]);
    }

    #[test]
    fn test_any_read_sets_last() {
        // First value arrives via ANY from the left; LAST then re-targets
        // the same peer for the second read.
        let mut machine = Machine::new();
        machine
            .load_code(&node_code(&[
                (4, &["MOV 11, RIGHT", "MOV 22, RIGHT", "JRO 0"]),
                (5, &["MOV ANY, ACC", "RES", "MOV LAST, ACC", "RES"]),
            ]))
            .unwrap();
        machine.outputs.push(Stream::output(5));

        machine.run_to_quiescence().unwrap();

        assert_eq!(machine.outputs[0].values, vec![11, 22]);
    }

    #[test]
    fn test_last_unset_reads_zero() {
        let mut machine = Machine::new();
        machine
            .load_code(&node_code(&[(
                0,
                &["MOV 5, ACC", "MOV LAST, ACC", "RES", "JRO 0"],
            )]))
            .unwrap();
        machine.outputs.push(Stream::output(0));

        machine.run_to_quiescence().unwrap();

        // The LAST read replaced ACC with the zero constant
        assert_eq!(machine.outputs[0].values, vec![0]);
    }

    #[test]
    fn test_any_write_arbitration() {
        // Node 5 writes ANY while only node 6 is asking for it; the writer
        // must find the reader through its MOV LEFT source.
        let mut machine = Machine::new();
        machine
            .load_code(&node_code(&[
                (5, &["MOV 77, ANY", "JRO 0"]),
                (6, &["MOV LEFT, ACC", "RES"]),
            ]))
            .unwrap();
        machine.outputs.push(Stream::output(6));

        machine.run_to_quiescence().unwrap();

        assert_eq!(machine.outputs[0].values, vec![77]);
    }

    #[test]
    fn test_empty_machine_quiesces() {
        let out = run(&[], &node_code(&[])).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_write_without_neighbour_freezes() {
        // Node 0 has no LEFT port; the write can never complete, the node
        // stays blocked and the machine quiesces with nothing emitted.
        let out = run(
            &[out_stream(8)],
            &node_code(&[(0, &["MOV 7, LEFT"])]),
        )
        .unwrap();

        assert_eq!(out.len(), 1);
        assert!(out[0].values.is_empty());
    }

    #[test]
    fn test_write_to_nil_fails() {
        let err = run(&[], &node_code(&[(0, &["MOV 1, NIL"])])).unwrap_err();
        assert!(matches!(err, GridasmError::Runtime(_)));
    }

    #[test]
    fn test_wrong_program_count() {
        let err = run(&[], &[]).unwrap_err();
        assert!(matches!(err, GridasmError::Shape(_)));
    }

    #[test]
    fn test_stream_index_out_of_range() {
        let err = run(&[in_stream(12, &[1])], &node_code(&[])).unwrap_err();
        assert!(matches!(err, GridasmError::Shape(_)));
    }

    #[test]
    fn test_parse_error_aborts_run() {
        let err = run(&[], &node_code(&[(3, &["FROB 1"])])).unwrap_err();
        assert!(matches!(err, GridasmError::Parse(_)));
    }

    #[test]
    fn test_jump_out_of_range_rewinds() {
        // JRO far past the end rewinds to 0, so the loop keeps flowing
        // until the input drains and everything blocks.
        let out = run(
            &[in_stream(0, &[8, 9]), out_stream(8)],
            &node_code(&[
                (0, &["MOV UP, DOWN", "JRO 99"]),
                (4, &["MOV UP, DOWN"]),
                (8, &["MOV UP, DOWN"]),
            ]),
        )
        .unwrap();

        assert_eq!(out[0].values, vec![8, 9]);
    }

    #[test]
    fn test_determinism() {
        let streams = [in_stream(0, &[3, -1, 4, -1, 5]), out_stream(8)];
        let code = node_code(&[
            (
                0,
                &[
                    "START: MOV UP, ACC",
                    "JLZ SKIP",
                    "MOV ACC, DOWN",
                    "SKIP: JMP START",
                ],
            ),
            (4, &["MOV UP, ACC", "ADD ACC", "MOV ACC, DOWN"]),
            (8, &["MOV UP, DOWN"]),
        ]);

        let first = run(&streams, &code).unwrap();
        let second = run(&streams, &code).unwrap();
        assert_eq!(first, second);
        assert_eq!(first[0].values, vec![6, 8, 10]);
    }

    #[test]
    fn test_acc_stays_in_domain() {
        // MOV of an oversized immediate into ACC saturates on assignment
        let mut machine = Machine::new();
        machine
            .load_code(&node_code(&[(0, &["MOV 5000, ACC", "RES", "JRO 0"])]))
            .unwrap();
        machine.outputs.push(Stream::output(0));

        machine.run_to_quiescence().unwrap();

        assert_eq!(machine.outputs[0].values, vec![MAX_ACC]);
    }
}
